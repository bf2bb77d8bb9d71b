//! Internal state of an association.

use alloc::sync::Arc;
use core::{fmt, time::Duration};

use crate::core::{dead_letter::DeadLetterSink, outbound_channel::OutboundChannel, pending_queue::PendingQueue};

/// The three states an association moves through, strictly forward.
pub(crate) enum AssociationState {
  /// Handshake in progress; envelopes buffer in the pending queue.
  Associating { queue: PendingQueue },
  /// Channel established; envelopes flush straight through.
  Associated { channel: Arc<dyn OutboundChannel> },
  /// Terminated; envelopes divert to the dead letter sink.
  Tombstone { sink: Arc<dyn DeadLetterSink>, since: Duration },
}

impl AssociationState {
  pub(crate) const fn kind(&self) -> AssociationStateKind {
    match self {
      | Self::Associating { .. } => AssociationStateKind::Associating,
      | Self::Associated { .. } => AssociationStateKind::Associated,
      | Self::Tombstone { .. } => AssociationStateKind::Tombstone,
    }
  }
}

impl fmt::Debug for AssociationState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Associating { queue } => f.debug_struct("Associating").field("pending", &queue.len()).finish(),
      | Self::Associated { .. } => f.debug_struct("Associated").finish_non_exhaustive(),
      | Self::Tombstone { since, .. } => f.debug_struct("Tombstone").field("since", since).finish_non_exhaustive(),
    }
  }
}

/// Observable position of an association in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssociationStateKind {
  /// Handshake in progress; sends are buffered.
  Associating,
  /// Channel bound; sends flush to the wire.
  Associated,
  /// Terminated; sends go to dead letters.
  Tombstone,
}
