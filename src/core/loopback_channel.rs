//! In-memory channel used by tests and single-process setups.

use alloc::{sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

use crate::core::{
  outbound_channel::{ChannelError, OutboundChannel},
  unique_node::UniqueNode,
  write_future::WriteFuture,
};

/// Channel that records every flushed frame in memory.
///
/// Writes complete immediately, so attached write futures resolve during
/// `write_and_flush`. The recorded frames preserve submission order.
pub struct LoopbackChannel {
  peer:   UniqueNode,
  frames: Mutex<Vec<Vec<u8>>>,
  closed: AtomicBool,
}

impl LoopbackChannel {
  /// Creates a loopback channel for the given peer.
  #[must_use]
  pub fn new(peer: UniqueNode) -> Arc<Self> {
    Arc::new(Self { peer, frames: Mutex::new(Vec::new()), closed: AtomicBool::new(false) })
  }

  /// Returns a snapshot of the recorded frames in write order.
  #[must_use]
  pub fn frames(&self) -> Vec<Vec<u8>> {
    self.frames.lock().clone()
  }

  /// Returns the number of recorded frames.
  #[must_use]
  pub fn frame_count(&self) -> usize {
    self.frames.lock().len()
  }

  /// Returns `true` once the channel has been closed.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::Acquire)
  }
}

impl OutboundChannel for LoopbackChannel {
  fn peer(&self) -> &UniqueNode {
    &self.peer
  }

  fn write_and_flush(&self, frame: Vec<u8>, ack: Option<WriteFuture>) -> Result<(), ChannelError> {
    if self.is_closed() {
      if let Some(ack) = ack {
        ack.complete(Err(ChannelError::Closed.into()));
      }
      return Err(ChannelError::Closed);
    }
    self.frames.lock().push(frame);
    if let Some(ack) = ack {
      ack.complete(Ok(()));
    }
    Ok(())
  }

  fn close(&self) {
    self.closed.store(true, Ordering::Release);
  }
}
