//! Duplex byte channel abstraction consumed by associations.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::core::{unique_node::UniqueNode, write_future::WriteFuture};

/// Error reported by a channel when a write cannot be submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelError {
  /// The channel has been closed.
  Closed,
  /// The underlying transport reported an I/O failure.
  Io(String),
}

impl fmt::Display for ChannelError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Closed => write!(f, "channel closed"),
      | Self::Io(detail) => write!(f, "transport i/o failure: {detail}"),
    }
  }
}

/// Outbound half of an established transport connection.
///
/// The association owns its channel strongly; the channel holds only the
/// logical peer identity as a back-reference. Implementations must accept
/// concurrent writes.
pub trait OutboundChannel: Send + Sync {
  /// Returns the logical peer the channel is connected to.
  fn peer(&self) -> &UniqueNode;

  /// Submits a frame to the channel's outbound queue without blocking on
  /// network I/O. The future, when supplied, resolves once the write has
  /// been flushed.
  ///
  /// # Errors
  ///
  /// Returns [`ChannelError`] when the frame could not be submitted at all;
  /// failures after submission are reported through the future.
  fn write_and_flush(&self, frame: Vec<u8>, ack: Option<WriteFuture>) -> Result<(), ChannelError>;

  /// Closes the channel. Submitted frames may still be flushed.
  fn close(&self);
}
