//! Why a message ended up in dead letters.

/// Reason recorded with a dead letter entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadLetterReason {
  /// The envelope was queued when its association terminated.
  AssociationTerminated,
  /// The envelope was sent to an already tombstoned association.
  AssociationTombstoned,
}
