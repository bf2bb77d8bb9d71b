//! Completion notifier attached to outgoing envelopes.

use alloc::sync::Arc;
use core::hint::spin_loop;

use spin::Mutex;

use crate::core::send_error::SendError;

struct WriteFutureState {
  value:     Option<Result<(), SendError>>,
  completed: bool,
}

impl WriteFutureState {
  const fn new() -> Self {
    Self { value: None, completed: false }
  }
}

/// Cooperative future resolved when the channel write for an envelope
/// completes, or failed when the envelope is routed to dead letters.
///
/// The first completion wins; later completions are ignored.
pub struct WriteFuture {
  state: Arc<Mutex<WriteFutureState>>,
}

impl WriteFuture {
  /// Creates a pending future.
  #[must_use]
  pub fn pending() -> Self {
    Self { state: Arc::new(Mutex::new(WriteFutureState::new())) }
  }

  /// Completes the future; subsequent completions are ignored.
  pub fn complete(&self, value: Result<(), SendError>) {
    let mut guard = self.state.lock();
    if guard.completed {
      return;
    }
    guard.value = Some(value);
    guard.completed = true;
  }

  /// Returns `true` when a value has been written.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.state.lock().completed
  }

  /// Attempts to take the value; returns `None` if not completed yet.
  pub fn try_take(&self) -> Option<Result<(), SendError>> {
    let mut guard = self.state.lock();
    if guard.completed {
      guard.completed = false;
      guard.value.take()
    } else {
      None
    }
  }

  /// Busy waits until the value is available and then consumes it.
  pub fn wait(self) -> Result<(), SendError> {
    loop {
      if let Some(value) = self.try_take() {
        return value;
      }
      spin_loop();
    }
  }
}

impl Default for WriteFuture {
  fn default() -> Self {
    Self::pending()
  }
}

impl Clone for WriteFuture {
  fn clone(&self) -> Self {
    Self { state: self.state.clone() }
  }
}
