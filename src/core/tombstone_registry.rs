//! Set of terminated-peer markers with periodic reaping.

#[cfg(test)]
mod tests;

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashSet;

use crate::core::{tombstone::Tombstone, unique_node::UniqueNode};

/// Tracks tombstones until their removal deadlines pass.
#[derive(Debug, Default)]
pub struct TombstoneRegistry {
  entries: HashSet<Tombstone>,
}

impl TombstoneRegistry {
  /// Creates an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Installs a tombstone, replacing any existing marker for the same peer
  /// so the later deadline wins.
  pub fn install(&mut self, tombstone: Tombstone) {
    self.entries.replace(tombstone);
  }

  /// Returns `true` when the peer is currently tombstoned.
  #[must_use]
  pub fn contains(&self, remote_node: &UniqueNode) -> bool {
    self.entries.contains(&Tombstone::probe(remote_node.clone()))
  }

  /// Removes every tombstone whose deadline is at or before `now` and
  /// returns the affected peers.
  pub fn reap(&mut self, now: Duration) -> Vec<UniqueNode> {
    let expired: Vec<Tombstone> =
      self.entries.iter().filter(|tombstone| tombstone.is_expired(now)).cloned().collect();
    for tombstone in &expired {
      self.entries.remove(tombstone);
    }
    expired.into_iter().map(|tombstone| tombstone.remote_node().clone()).collect()
  }

  /// Returns the number of live tombstones.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when no tombstone is held.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
