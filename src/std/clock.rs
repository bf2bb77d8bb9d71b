//! Monotonic time source for core operations.

extern crate std;

use core::time::Duration;
use std::time::Instant;

/// Clock measuring monotonic time since its creation.
///
/// Core operations take `now` as a plain [`Duration`]; this clock is the
/// production source of those values.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
  origin: Instant,
}

impl MonotonicClock {
  /// Creates a clock whose origin is the current instant.
  #[must_use]
  pub fn new() -> Self {
    Self { origin: Instant::now() }
  }

  /// Returns the time elapsed since the clock was created.
  #[must_use]
  pub fn now(&self) -> Duration {
    self.origin.elapsed()
  }
}

impl Default for MonotonicClock {
  fn default() -> Self {
    Self::new()
  }
}
