//! Per-process incarnation identifier.

use core::fmt;

/// Random incarnation tag drawn once per node run.
///
/// The tag distinguishes two processes that reuse the same network endpoint;
/// it never repeats across restarts of the same address in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
  /// Creates a node id from a raw value.
  #[must_use]
  pub const fn new(value: u32) -> Self {
    Self(value)
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn value(self) -> u32 {
    self.0
  }

  /// Draws a fresh incarnation tag from the operating system RNG.
  #[cfg(feature = "std")]
  #[must_use]
  pub fn random() -> Self {
    use rand::RngCore;

    Self(rand::rngs::OsRng.next_u32())
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:08x}", self.0)
  }
}
