//! Configuration applied when bootstrapping the cluster shell.

use core::time::Duration;

const DEFAULT_TOMBSTONE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_DEAD_LETTER_CAPACITY: usize = 256;

/// Tunables of the remote association subsystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterSettings {
  association_tombstone_ttl: Duration,
  handshake_timeout:         Duration,
  dead_letter_capacity:      usize,
}

impl ClusterSettings {
  /// Creates settings with the default values.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      association_tombstone_ttl: DEFAULT_TOMBSTONE_TTL,
      handshake_timeout:         DEFAULT_HANDSHAKE_TIMEOUT,
      dead_letter_capacity:      DEFAULT_DEAD_LETTER_CAPACITY,
    }
  }

  /// Overrides how long tombstones are retained.
  #[must_use]
  pub const fn with_association_tombstone_ttl(mut self, ttl: Duration) -> Self {
    self.association_tombstone_ttl = ttl;
    self
  }

  /// Overrides the handshake reply deadline.
  #[must_use]
  pub const fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
    self.handshake_timeout = timeout;
    self
  }

  /// Overrides the dead letter buffer capacity.
  #[must_use]
  pub const fn with_dead_letter_capacity(mut self, capacity: usize) -> Self {
    self.dead_letter_capacity = capacity;
    self
  }

  /// Returns how long tombstones are retained.
  #[must_use]
  pub const fn association_tombstone_ttl(&self) -> Duration {
    self.association_tombstone_ttl
  }

  /// Returns the handshake reply deadline.
  #[must_use]
  pub const fn handshake_timeout(&self) -> Duration {
    self.handshake_timeout
  }

  /// Returns the dead letter buffer capacity.
  #[must_use]
  pub const fn dead_letter_capacity(&self) -> usize {
    self.dead_letter_capacity
  }

  /// Returns the cadence at which expired tombstones are reaped: half the
  /// retention period, so no tombstone outlives its deadline by more than
  /// one interval.
  #[must_use]
  pub fn tombstone_reap_interval(&self) -> Duration {
    self.association_tombstone_ttl / 2
  }
}

impl Default for ClusterSettings {
  fn default() -> Self {
    Self::new()
  }
}
