#![cfg(test)]

use alloc::{string::String, vec};
use core::time::Duration;

use super::{DeadLetterEntry, DeadLetterReason, DeadLetterSink, DeadLetters, UndeliveredMessage};
use crate::core::{
  actor_address::ActorAddress, node::Node, node_id::NodeId, serialized_message::SerializedMessage,
  transport_envelope::TransportEnvelope, unique_node::UniqueNode,
};

fn recipient() -> ActorAddress {
  let node = UniqueNode::new(Node::new("billing", "10.0.0.2", 7337), NodeId::new(0x22));
  ActorAddress::new(Some(node), vec![String::from("user"), String::from("invoices")], 1)
}

fn entry(marker: u8) -> DeadLetterEntry {
  DeadLetterEntry::new(
    UndeliveredMessage::User(SerializedMessage::new(vec![marker])),
    recipient(),
    DeadLetterReason::AssociationTerminated,
    Duration::from_millis(u64::from(marker)),
  )
}

#[test]
fn entry_captures_the_envelope_message_and_recipient() {
  let envelope = TransportEnvelope::user(SerializedMessage::new(vec![1, 2, 3]), recipient());
  let entry = DeadLetterEntry::from_envelope(envelope, DeadLetterReason::AssociationTombstoned, Duration::ZERO);
  assert_eq!(entry.recipient(), &recipient());
  assert_eq!(entry.reason(), DeadLetterReason::AssociationTombstoned);
  let UndeliveredMessage::User(payload) = entry.message() else {
    panic!("expected a user payload");
  };
  assert_eq!(payload.bytes(), &[1, 2, 3]);
}

#[test]
fn store_retains_the_most_recent_entries() {
  let store = DeadLetters::new(2);
  store.offer(entry(1));
  store.offer(entry(2));
  store.offer(entry(3));

  let entries = store.entries();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].timestamp(), Duration::from_millis(2));
  assert_eq!(entries[1].timestamp(), Duration::from_millis(3));
  assert_eq!(store.total(), 3);
}
