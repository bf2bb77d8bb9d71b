//! Lifecycle notifications emitted by the cluster shell.

use crate::core::{handshake::HandshakeError, unique_node::UniqueNode};

/// Observable lifecycle transitions of remote associations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemotingLifecycleEvent {
  /// An association reached the *associated* state.
  Connected {
    /// The now-reachable peer.
    remote: UniqueNode,
  },
  /// An outbound handshake attempt failed.
  HandshakeRejected {
    /// The peer the attempt targeted.
    remote: UniqueNode,
    /// Why the attempt failed.
    error:  HandshakeError,
  },
  /// An association terminated and left a tombstone behind.
  Tombstoned {
    /// The terminated peer.
    remote: UniqueNode,
  },
  /// A tombstone passed its removal deadline and was reaped.
  TombstoneExpired {
    /// The peer that may now associate again.
    remote: UniqueNode,
  },
}
