#![cfg(test)]

use alloc::{string::String, vec, vec::Vec};

use super::ActorAddress;
use crate::core::{
  node::Node, node_id::NodeId, serialization_context::SerializationContext, unique_node::UniqueNode,
  wire_error::WireError,
};

fn local_node() -> UniqueNode {
  UniqueNode::new(Node::new("orders", "10.0.0.1", 7337), NodeId::new(0x11))
}

fn remote_node() -> UniqueNode {
  UniqueNode::new(Node::new("billing", "10.0.0.2", 7337), NodeId::new(0x22))
}

fn segments(parts: &[&str]) -> Vec<String> {
  parts.iter().map(|part| String::from(*part)).collect()
}

#[test]
fn encode_decode_round_trip() {
  let address = ActorAddress::new(Some(remote_node()), segments(&["user", "ledger", "worker-3"]), 42);
  let context = SerializationContext::new(local_node());
  let mut buffer = Vec::new();
  address.encode_into(&mut buffer, &context);
  let mut cursor = 0;
  let decoded = ActorAddress::decode(&buffer, &mut cursor).expect("decode");
  assert_eq!(decoded, address);
  assert_eq!(cursor, buffer.len());
}

#[test]
fn encoding_substitutes_local_node_for_node_less_addresses() {
  let address = ActorAddress::new(None, segments(&["user", "ledger"]), 7);
  let context = SerializationContext::new(local_node());
  let mut buffer = Vec::new();
  address.encode_into(&mut buffer, &context);
  let mut cursor = 0;
  let decoded = ActorAddress::decode(&buffer, &mut cursor).expect("decode");
  assert_eq!(decoded.node(), Some(&local_node()));
  assert_eq!(decoded.path(), address.path());
  assert_eq!(decoded.incarnation(), 7);
}

#[test]
fn detached_encoding_requires_a_node() {
  let address = ActorAddress::new(None, segments(&["user"]), 1);
  let mut buffer = Vec::new();
  assert_eq!(address.encode_detached(&mut buffer), Err(WireError::MissingSerializationContext));

  let with_node = ActorAddress::new(Some(remote_node()), segments(&["user"]), 1);
  assert!(with_node.encode_detached(&mut buffer).is_ok());
}

#[test]
fn decode_rejects_empty_path() {
  let context = SerializationContext::new(local_node());
  let address = ActorAddress::new(Some(remote_node()), vec![String::from("user")], 1);
  let mut buffer = Vec::new();
  address.encode_into(&mut buffer, &context);
  // Rewrite the segment count (directly after the node) to zero.
  let mut probe = Vec::new();
  remote_node().encode_into(&mut probe);
  buffer[probe.len()] = 0;
  buffer[probe.len() + 1] = 0;
  let mut cursor = 0;
  assert!(matches!(ActorAddress::decode(&buffer, &mut cursor), Err(WireError::EmptyField("path"))));
}
