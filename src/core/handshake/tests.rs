#![cfg(test)]

use alloc::string::String;
use core::time::Duration;

use super::{HandshakeError, HandshakeFrame, HandshakeState, HandshakeStateMachine, RejectReason};
use crate::core::{node::Node, node_id::NodeId, unique_node::UniqueNode, wire_error::WireError};

fn node(nid: u32) -> UniqueNode {
  UniqueNode::new(Node::new("orders", "10.0.0.1", 7337), NodeId::new(nid))
}

#[test]
fn offer_round_trip() {
  let frame = HandshakeFrame::Offer { origin: node(1), target: node(2) };
  assert_eq!(HandshakeFrame::decode(&frame.encode()), Ok(frame));
}

#[test]
fn accept_round_trip() {
  let frame = HandshakeFrame::Accept { origin: node(3) };
  assert_eq!(HandshakeFrame::decode(&frame.encode()), Ok(frame));
}

#[test]
fn reject_round_trip_keeps_reason_and_message() {
  let frame = HandshakeFrame::Reject { reason: RejectReason::Tombstoned, message: String::from("gone for good") };
  let encoded = frame.encode();
  assert_eq!(encoded[1], 3);
  assert_eq!(HandshakeFrame::decode(&encoded), Ok(frame));
}

#[test]
fn reject_reason_codes_cover_the_wire_range() {
  for code in 1..=5 {
    let reason = RejectReason::from_wire(code).expect("known code");
    assert_eq!(reason.to_wire(), code);
  }
  assert!(RejectReason::from_wire(0).is_none());
  assert!(RejectReason::from_wire(6).is_none());
}

#[test]
fn unknown_reject_reason_fails_the_decode() {
  let mut encoded = HandshakeFrame::Reject { reason: RejectReason::Other, message: String::new() }.encode();
  encoded[1] = 0x2A;
  assert_eq!(HandshakeFrame::decode(&encoded), Err(WireError::UnknownRejectReason(0x2A)));
}

#[test]
fn machine_completes_on_accept() {
  let mut machine = HandshakeStateMachine::initiate(node(1), node(2), Duration::ZERO);
  assert!(machine.is_initiated());
  let HandshakeFrame::Offer { origin, target } = machine.offer() else {
    panic!("expected an offer");
  };
  assert_eq!(origin, node(1));
  assert_eq!(target, node(2));

  machine.on_accept(node(2));
  let HandshakeState::Completed(negotiated) = machine.state() else {
    panic!("expected completion");
  };
  assert_eq!(negotiated.remote_node, node(2));
  assert_eq!(negotiated.local_node, node(1));
}

#[test]
fn machine_rejects_and_ignores_later_replies() {
  let mut machine = HandshakeStateMachine::initiate(node(1), node(2), Duration::ZERO);
  machine.on_reject(RejectReason::ConcurrentLost, String::from("lost"));
  assert!(matches!(
    machine.state(),
    HandshakeState::Rejected(HandshakeError::Rejected(RejectReason::ConcurrentLost, _))
  ));

  machine.on_accept(node(2));
  assert!(matches!(machine.state(), HandshakeState::Rejected(_)));
}

#[test]
fn machine_times_out_only_past_the_deadline() {
  let timeout = Duration::from_secs(5);
  let mut machine = HandshakeStateMachine::initiate(node(1), node(2), Duration::from_secs(10));
  assert!(!machine.is_expired(Duration::from_secs(14), timeout));
  assert!(machine.is_expired(Duration::from_secs(15), timeout));

  machine.on_timeout();
  assert!(matches!(machine.state(), HandshakeState::Rejected(HandshakeError::TimedOut)));
  assert!(!machine.is_expired(Duration::from_secs(20), timeout));
}
