//! Dead letter sink logging through `tracing`.

use alloc::sync::Arc;

use crate::core::{DeadLetterEntry, DeadLetterSink};

/// Logs every dead letter at `warn` level, optionally forwarding the entry
/// to a retaining sink such as [`DeadLetters`](crate::core::DeadLetters).
pub struct TracingDeadLetterSink {
  inner: Option<Arc<dyn DeadLetterSink>>,
}

impl TracingDeadLetterSink {
  /// Creates a sink that only logs.
  #[must_use]
  pub const fn new() -> Self {
    Self { inner: None }
  }

  /// Creates a sink that logs and then forwards to `inner`.
  #[must_use]
  pub fn forwarding_to(inner: Arc<dyn DeadLetterSink>) -> Self {
    Self { inner: Some(inner) }
  }
}

impl Default for TracingDeadLetterSink {
  fn default() -> Self {
    Self::new()
  }
}

impl DeadLetterSink for TracingDeadLetterSink {
  fn offer(&self, entry: DeadLetterEntry) {
    tracing::warn!(
      recipient = %entry.recipient(),
      reason = ?entry.reason(),
      "dead letter"
    );
    if let Some(inner) = self.inner.as_ref() {
      inner.offer(entry);
    }
  }
}
