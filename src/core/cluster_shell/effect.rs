//! Effects the surrounding driver must perform for the shell.

use super::event::RemotingLifecycleEvent;
use crate::core::handshake::HandshakeFrame;

/// Actions produced by shell operations.
///
/// The shell mutates only its own state; anything that touches the network
/// or the log is described as an effect and carried out by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEffect {
  /// Open a connection to the offer's target and send the offer.
  InitiateHandshake {
    /// The offer frame to transmit.
    offer: HandshakeFrame,
  },
  /// Send a reply frame on the connection the offer arrived on. When the
  /// reply is an accept, the shell expects `on_handshake_completed` once
  /// the reply has been flushed.
  ReplyToOffer {
    /// The accept or reject frame to transmit.
    frame: HandshakeFrame,
  },
  /// Publish a lifecycle event.
  Lifecycle(RemotingLifecycleEvent),
}
