#![cfg(test)]

use alloc::{string::String, sync::Arc, vec, vec::Vec};
use core::time::Duration;

use super::{Association, AssociationStateKind};
use crate::core::{
  actor_address::ActorAddress,
  dead_letter::{DeadLetterReason, DeadLetters, UndeliveredMessage},
  loopback_channel::LoopbackChannel,
  node::Node,
  node_id::NodeId,
  outbound_channel::OutboundChannel,
  send_error::SendError,
  serialization_context::SerializationContext,
  serialized_message::SerializedMessage,
  transport_envelope::TransportEnvelope,
  unique_node::UniqueNode,
  write_future::WriteFuture,
};

const TTL: Duration = Duration::from_secs(60);

fn self_node() -> UniqueNode {
  UniqueNode::new(Node::new("orders", "10.0.0.1", 7337), NodeId::new(0x11))
}

fn remote_node() -> UniqueNode {
  UniqueNode::new(Node::new("billing", "10.0.0.2", 7337), NodeId::new(0x22))
}

fn recipient() -> ActorAddress {
  ActorAddress::new(Some(remote_node()), vec![String::from("user"), String::from("invoices")], 1)
}

fn envelope(marker: u8) -> TransportEnvelope {
  TransportEnvelope::user(SerializedMessage::new(vec![marker]), recipient())
}

fn expected_frame(marker: u8) -> Vec<u8> {
  envelope(marker).encode_frame(&SerializationContext::new(self_node()))
}

#[test]
fn buffered_sends_flush_in_fifo_order_on_completion() {
  let association = Association::associating(self_node(), remote_node());
  association.send(envelope(1)).expect("send");
  association.send(envelope(2)).expect("send");
  association.send(envelope(3)).expect("send");
  assert_eq!(association.state_kind(), AssociationStateKind::Associating);
  assert_eq!(association.pending_count(), 3);

  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());
  assert_eq!(association.state_kind(), AssociationStateKind::Associated);
  assert_eq!(association.pending_count(), 0);
  assert_eq!(channel.frames(), vec![expected_frame(1), expected_frame(2), expected_frame(3)]);
}

#[test]
fn sends_after_completion_write_straight_through() {
  let association = Association::associating(self_node(), remote_node());
  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());

  let ack = WriteFuture::pending();
  association
    .send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![9]), recipient(), ack.clone()))
    .expect("send");
  assert_eq!(channel.frames(), vec![expected_frame(9)]);
  assert_eq!(ack.try_take(), Some(Ok(())));
}

#[test]
fn buffered_write_futures_resolve_when_the_queue_flushes() {
  let association = Association::associating(self_node(), remote_node());
  let ack = WriteFuture::pending();
  association
    .send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![5]), recipient(), ack.clone()))
    .expect("send");
  assert!(!ack.is_completed());

  association.complete_association(LoopbackChannel::new(remote_node()));
  assert_eq!(ack.try_take(), Some(Ok(())));
}

#[test]
#[should_panic(expected = "completed twice")]
fn completing_twice_panics() {
  let association = Association::associating(self_node(), remote_node());
  association.complete_association(LoopbackChannel::new(remote_node()));
  association.complete_association(LoopbackChannel::new(remote_node()));
}

#[test]
fn completing_a_tombstoned_association_closes_the_channel() {
  let association = Association::associating(self_node(), remote_node());
  let sink = Arc::new(DeadLetters::with_default_capacity());
  association.terminate(sink, Duration::ZERO, TTL);

  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());
  assert!(channel.is_closed());
  assert_eq!(association.state_kind(), AssociationStateKind::Tombstone);
}

#[test]
fn terminate_drains_the_queue_to_dead_letters_and_fails_futures() {
  let association = Association::associating(self_node(), remote_node());
  let ack = WriteFuture::pending();
  association
    .send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![7]), recipient(), ack.clone()))
    .expect("send");
  association.send(envelope(8)).expect("send");

  let sink = Arc::new(DeadLetters::with_default_capacity());
  let tombstone = association.terminate(sink.clone(), Duration::from_secs(1), TTL);
  assert_eq!(tombstone.remote_node(), &remote_node());
  assert_eq!(tombstone.removal_deadline(), Some(Duration::from_secs(1) + TTL));

  assert_eq!(ack.try_take(), Some(Err(SendError::AssociationTerminated)));
  let entries = sink.entries();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].reason(), DeadLetterReason::AssociationTerminated);
  let UndeliveredMessage::User(payload) = entries[0].message() else {
    panic!("expected a user payload");
  };
  assert_eq!(payload.bytes(), &[7]);
}

#[test]
fn terminate_closes_an_established_channel() {
  let association = Association::associating(self_node(), remote_node());
  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());

  let sink = Arc::new(DeadLetters::with_default_capacity());
  association.terminate(sink, Duration::ZERO, TTL);
  assert!(channel.is_closed());
  assert_eq!(association.state_kind(), AssociationStateKind::Tombstone);
}

#[test]
fn tombstoned_send_dead_letters_once_and_fails_the_future() {
  let association = Association::associating(self_node(), remote_node());
  let sink = Arc::new(DeadLetters::with_default_capacity());
  association.terminate(sink.clone(), Duration::ZERO, TTL);

  let ack = WriteFuture::pending();
  let result =
    association.send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![4]), recipient(), ack.clone()));
  assert_eq!(result, Err(SendError::AssociationTerminated));
  assert_eq!(ack.try_take(), Some(Err(SendError::AssociationTerminated)));
  assert_eq!(sink.entries().len(), 1);
  assert_eq!(sink.entries()[0].recipient(), &recipient());
  assert_eq!(sink.total(), 1);
}

#[test]
fn terminate_is_idempotent_once_tombstoned() {
  let association = Association::associating(self_node(), remote_node());
  let sink = Arc::new(DeadLetters::with_default_capacity());
  association.terminate(sink.clone(), Duration::ZERO, TTL);
  let tombstone = association.terminate(sink.clone(), Duration::from_secs(5), TTL);
  assert_eq!(tombstone.removal_deadline(), Some(Duration::from_secs(5) + TTL));
  assert_eq!(association.state_kind(), AssociationStateKind::Tombstone);
  assert_eq!(sink.total(), 0);
}

#[test]
fn every_envelope_is_accounted_for() {
  // Invariant: sends = channel writes + dead letters + still-pending.
  let association = Association::associating(self_node(), remote_node());
  for marker in 0..4 {
    association.send(envelope(marker)).expect("send");
  }
  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());
  association.send(envelope(4)).expect("send");

  let sink = Arc::new(DeadLetters::with_default_capacity());
  association.terminate(sink.clone(), Duration::ZERO, TTL);
  let _ = association.send(envelope(5));

  assert_eq!(channel.frame_count() as u64 + sink.total() + association.pending_count() as u64, 6);
}

#[test]
fn failed_channel_writes_fail_the_future_without_tombstoning() {
  let association = Association::associating(self_node(), remote_node());
  let channel = LoopbackChannel::new(remote_node());
  association.complete_association(channel.clone());
  channel.close();

  let ack = WriteFuture::pending();
  let result =
    association.send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![2]), recipient(), ack.clone()));
  assert!(matches!(result, Err(SendError::ChannelWrite(_))));
  assert!(matches!(ack.try_take(), Some(Err(SendError::ChannelWrite(_)))));
  // The association stays associated; reconnection policy lives elsewhere.
  assert_eq!(association.state_kind(), AssociationStateKind::Associated);
}
