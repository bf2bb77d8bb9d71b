//! Shared wrapper for the cluster shell.

use alloc::sync::Arc;

use spin::RwLock;

use super::ClusterShell;

/// Clonable handle serialising access to a [`ClusterShell`].
///
/// The shell itself takes `&mut self`; this wrapper is the single lock
/// through which the driver and inbound connection tasks reach it.
pub struct ClusterShellShared {
  inner: Arc<RwLock<ClusterShell>>,
}

impl ClusterShellShared {
  /// Wraps a shell for shared access.
  #[must_use]
  pub fn new(shell: ClusterShell) -> Self {
    Self { inner: Arc::new(RwLock::new(shell)) }
  }

  /// Runs `f` with shared read access to the shell.
  pub fn with_read<R>(&self, f: impl FnOnce(&ClusterShell) -> R) -> R {
    let guard = self.inner.read();
    f(&guard)
  }

  /// Runs `f` with exclusive access to the shell.
  pub fn with_write<R>(&self, f: impl FnOnce(&mut ClusterShell) -> R) -> R {
    let mut guard = self.inner.write();
    f(&mut guard)
  }
}

impl Clone for ClusterShellShared {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}
