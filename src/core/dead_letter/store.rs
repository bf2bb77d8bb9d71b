//! Bounded in-memory dead letter store.

use alloc::vec::Vec;
use core::sync::atomic::Ordering;

use portable_atomic::AtomicU64;
use spin::Mutex;

use super::{entry::DeadLetterEntry, DeadLetterSink};

const DEFAULT_CAPACITY: usize = 256;

/// Collects undeliverable messages, keeping the most recent `capacity`
/// entries and counting every offer.
pub struct DeadLetters {
  entries:  Mutex<Vec<DeadLetterEntry>>,
  capacity: usize,
  total:    AtomicU64,
}

impl DeadLetters {
  /// Creates a store with the provided buffer capacity.
  #[must_use]
  pub const fn new(capacity: usize) -> Self {
    Self { entries: Mutex::new(Vec::new()), capacity, total: AtomicU64::new(0) }
  }

  /// Creates a store with the default capacity.
  #[must_use]
  pub const fn with_default_capacity() -> Self {
    Self::new(DEFAULT_CAPACITY)
  }

  /// Returns a snapshot of the retained entries, oldest first.
  #[must_use]
  pub fn entries(&self) -> Vec<DeadLetterEntry> {
    self.entries.lock().clone()
  }

  /// Returns the total number of entries ever offered.
  #[must_use]
  pub fn total(&self) -> u64 {
    self.total.load(Ordering::Relaxed)
  }
}

impl Default for DeadLetters {
  fn default() -> Self {
    Self::with_default_capacity()
  }
}

impl DeadLetterSink for DeadLetters {
  fn offer(&self, entry: DeadLetterEntry) {
    self.total.fetch_add(1, Ordering::Relaxed);
    let mut entries = self.entries.lock();
    entries.push(entry);
    if entries.len() > self.capacity {
      let overflow = entries.len() - self.capacity;
      entries.drain(0..overflow);
    }
  }
}
