//! Marker left behind by a terminated association.

use core::{
  hash::{Hash, Hasher},
  time::Duration,
};

use crate::core::unique_node::UniqueNode;

/// Marker preventing a terminated peer from being re-associated until its
/// removal deadline passes.
///
/// Equality and hashing consider the remote node only, so a deadline-less
/// [`probe`](Self::probe) works as a lookup key against a stored tombstone.
#[derive(Clone, Debug)]
pub struct Tombstone {
  remote_node:      UniqueNode,
  removal_deadline: Option<Duration>,
}

impl Tombstone {
  /// Creates a tombstone expiring at `removal_deadline`.
  #[must_use]
  pub const fn new(remote_node: UniqueNode, removal_deadline: Duration) -> Self {
    Self { remote_node, removal_deadline: Some(removal_deadline) }
  }

  /// Creates a deadline-less tombstone usable only as a lookup key.
  #[must_use]
  pub const fn probe(remote_node: UniqueNode) -> Self {
    Self { remote_node, removal_deadline: None }
  }

  /// Returns the terminated peer.
  #[must_use]
  pub const fn remote_node(&self) -> &UniqueNode {
    &self.remote_node
  }

  /// Returns the removal deadline, when one was recorded.
  #[must_use]
  pub const fn removal_deadline(&self) -> Option<Duration> {
    self.removal_deadline
  }

  /// Returns `true` when the tombstone is due for removal at `now`.
  /// Deadline-less probes never expire.
  #[must_use]
  pub fn is_expired(&self, now: Duration) -> bool {
    self.removal_deadline.is_some_and(|deadline| deadline <= now)
  }
}

impl PartialEq for Tombstone {
  fn eq(&self, other: &Self) -> bool {
    self.remote_node == other.remote_node
  }
}

impl Eq for Tombstone {}

impl Hash for Tombstone {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.remote_node.hash(state);
  }
}
