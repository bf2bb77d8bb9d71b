//! Long-lived per-peer association routing every outgoing envelope.

mod state;
#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use core::{fmt, time::Duration};

use spin::Mutex;

pub use state::AssociationStateKind;
use state::AssociationState;

use crate::core::{
  dead_letter::{DeadLetterEntry, DeadLetterReason, DeadLetterSink},
  outbound_channel::OutboundChannel,
  pending_queue::PendingQueue,
  send_error::SendError,
  serialization_context::SerializationContext,
  tombstone::Tombstone,
  transport_envelope::TransportEnvelope,
  unique_node::UniqueNode,
};

/// The relationship between this node and one remote peer, through which
/// all messages to that peer flow.
///
/// State moves strictly forward: *associating* → *associated* → *tombstone*
/// (or directly *associating* → *tombstone*). Any number of producers may
/// call [`send`](Self::send) concurrently; the single state lock makes the
/// buffer-to-channel transition atomic with respect to new senders, which
/// is what preserves FIFO ordering across the seam.
pub struct Association {
  remote_node: UniqueNode,
  context:     SerializationContext,
  state:       Mutex<AssociationState>,
}

impl Association {
  /// Creates an association in the *associating* state, ready to buffer
  /// envelopes while the handshake runs.
  #[must_use]
  pub fn associating(self_node: UniqueNode, remote_node: UniqueNode) -> Self {
    Self {
      remote_node,
      context: SerializationContext::new(self_node),
      state: Mutex::new(AssociationState::Associating { queue: PendingQueue::new() }),
    }
  }

  /// Creates an association born terminated; every send dead-letters.
  #[must_use]
  pub fn tombstoned(
    self_node: UniqueNode,
    remote_node: UniqueNode,
    sink: Arc<dyn DeadLetterSink>,
    now: Duration,
  ) -> Self {
    Self {
      remote_node,
      context: SerializationContext::new(self_node),
      state: Mutex::new(AssociationState::Tombstone { sink, since: now }),
    }
  }

  /// Returns the local side of the association.
  #[must_use]
  pub const fn self_node(&self) -> &UniqueNode {
    self.context.local_node()
  }

  /// Returns the remote peer.
  #[must_use]
  pub const fn remote_node(&self) -> &UniqueNode {
    &self.remote_node
  }

  /// Returns where the association currently is in its lifecycle.
  #[must_use]
  pub fn state_kind(&self) -> AssociationStateKind {
    self.state.lock().kind()
  }

  /// Returns the number of buffered envelopes; zero outside *associating*.
  #[must_use]
  pub fn pending_count(&self) -> usize {
    match &*self.state.lock() {
      | AssociationState::Associating { queue } => queue.len(),
      | _ => 0,
    }
  }

  /// Routes one envelope according to the current state: buffered while
  /// *associating*, written through while *associated*, dead-lettered once
  /// *tombstone*.
  ///
  /// Never blocks on network I/O. The envelope's write future, when
  /// present, resolves on flush or fails with the returned error.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::AssociationTerminated`] when the association is
  /// tombstoned and [`SendError::ChannelWrite`] when the channel refused
  /// the frame.
  pub fn send(&self, mut envelope: TransportEnvelope) -> Result<(), SendError> {
    let mut state = self.state.lock();
    match &mut *state {
      | AssociationState::Associating { queue } => {
        queue.push(envelope);
        Ok(())
      },
      | AssociationState::Associated { channel } => {
        let frame = envelope.encode_frame(&self.context);
        let ack = envelope.take_ack();
        match channel.write_and_flush(frame, ack.clone()) {
          | Ok(()) => Ok(()),
          | Err(error) => {
            let error = SendError::ChannelWrite(error);
            if let Some(ack) = ack {
              ack.complete(Err(error.clone()));
            }
            Err(error)
          },
        }
      },
      | AssociationState::Tombstone { sink, since } => {
        if let Some(ack) = envelope.take_ack() {
          ack.complete(Err(SendError::AssociationTerminated));
        }
        sink.offer(DeadLetterEntry::from_envelope(envelope, DeadLetterReason::AssociationTombstoned, *since));
        Err(SendError::AssociationTerminated)
      },
    }
  }

  /// Binds the channel produced by a successful handshake: transitions to
  /// *associated* and drains the pending queue into the channel in enqueue
  /// order, atomically with respect to concurrent senders.
  ///
  /// Called on an already tombstoned association, the supplied channel is
  /// closed and nothing else happens.
  ///
  /// # Panics
  ///
  /// Panics when the association is already *associated*; completing a
  /// handshake twice is a programmer error.
  pub fn complete_association(&self, channel: Arc<dyn OutboundChannel>) {
    let mut state = self.state.lock();
    match &mut *state {
      | AssociationState::Associating { queue } => {
        for mut envelope in queue.drain() {
          let frame = envelope.encode_frame(&self.context);
          let ack = envelope.take_ack();
          if let Err(error) = channel.write_and_flush(frame, ack.clone()) {
            if let Some(ack) = ack {
              ack.complete(Err(SendError::ChannelWrite(error)));
            }
          }
        }
        *state = AssociationState::Associated { channel };
      },
      | AssociationState::Associated { .. } => {
        panic!("association with {} completed twice", self.remote_node);
      },
      | AssociationState::Tombstone { .. } => {
        channel.close();
      },
    }
  }

  /// Terminates the association: queued envelopes divert to `sink` with
  /// their futures failed, an established channel is closed, and the state
  /// becomes *tombstone*. Idempotent once tombstoned (the original sink is
  /// kept).
  ///
  /// Returns the tombstone to install, with its removal deadline set
  /// `ttl` past `now`.
  pub fn terminate(&self, sink: Arc<dyn DeadLetterSink>, now: Duration, ttl: Duration) -> Tombstone {
    let mut state = self.state.lock();
    match &mut *state {
      | AssociationState::Associating { queue } => {
        for mut envelope in queue.drain() {
          if let Some(ack) = envelope.take_ack() {
            ack.complete(Err(SendError::AssociationTerminated));
          }
          sink.offer(DeadLetterEntry::from_envelope(envelope, DeadLetterReason::AssociationTerminated, now));
        }
        *state = AssociationState::Tombstone { sink, since: now };
      },
      | AssociationState::Associated { channel } => {
        channel.close();
        *state = AssociationState::Tombstone { sink, since: now };
      },
      | AssociationState::Tombstone { .. } => {},
    }
    Tombstone::new(self.remote_node.clone(), now + ttl)
  }
}

impl fmt::Debug for Association {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Association")
      .field("remote_node", &self.remote_node)
      .field("state", &*self.state.lock())
      .finish_non_exhaustive()
  }
}
