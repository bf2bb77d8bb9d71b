#![cfg(test)]

use core::time::Duration;

use super::TombstoneRegistry;
use crate::core::{node::Node, node_id::NodeId, tombstone::Tombstone, unique_node::UniqueNode};

fn node(nid: u32) -> UniqueNode {
  UniqueNode::new(Node::new("orders", "10.0.0.1", 7337), NodeId::new(nid))
}

#[test]
fn probe_finds_a_stored_tombstone_regardless_of_deadline() {
  let mut registry = TombstoneRegistry::new();
  registry.install(Tombstone::new(node(1), Duration::from_secs(60)));
  assert!(registry.contains(&node(1)));
  assert!(!registry.contains(&node(2)));
}

#[test]
fn reinstall_replaces_the_deadline() {
  let mut registry = TombstoneRegistry::new();
  registry.install(Tombstone::new(node(1), Duration::from_millis(10)));
  registry.install(Tombstone::new(node(1), Duration::from_millis(50)));
  assert_eq!(registry.len(), 1);

  // The first deadline has passed but the refreshed one has not.
  assert!(registry.reap(Duration::from_millis(20)).is_empty());
  assert_eq!(registry.reap(Duration::from_millis(50)), alloc::vec![node(1)]);
  assert!(registry.is_empty());
}

#[test]
fn reap_removes_only_expired_entries() {
  let mut registry = TombstoneRegistry::new();
  registry.install(Tombstone::new(node(1), Duration::from_millis(10)));
  registry.install(Tombstone::new(node(2), Duration::from_millis(30)));

  let reaped = registry.reap(Duration::from_millis(11));
  assert_eq!(reaped, alloc::vec![node(1)]);
  assert!(!registry.contains(&node(1)));
  assert!(registry.contains(&node(2)));
}

#[test]
fn deadline_less_probes_never_expire() {
  let probe = Tombstone::probe(node(1));
  assert!(!probe.is_expired(Duration::from_secs(u64::MAX / 2)));
  assert_eq!(probe.removal_deadline(), None);
}
