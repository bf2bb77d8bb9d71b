//! Per-attempt handshake state machine.

use alloc::string::String;
use core::time::Duration;

use super::{error::HandshakeError, frame::HandshakeFrame, reject_reason::RejectReason};
use crate::core::unique_node::UniqueNode;

/// Outcome of a completed handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatedHandshake {
  /// The local side of the association.
  pub local_node:  UniqueNode,
  /// The confirmed remote side.
  pub remote_node: UniqueNode,
}

/// State of one handshake attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeState {
  /// The offer has been sent; a reply is pending.
  Initiated,
  /// The peer accepted the offer.
  Completed(NegotiatedHandshake),
  /// The attempt failed.
  Rejected(HandshakeError),
}

/// Drives one outbound handshake attempt from offer to completion or
/// rejection. Both sides of a connection run the same machine for the
/// attempts they initiate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeStateMachine {
  local_node:  UniqueNode,
  remote_node: UniqueNode,
  started_at:  Duration,
  state:       HandshakeState,
}

impl HandshakeStateMachine {
  /// Starts a new attempt toward `remote_node`.
  #[must_use]
  pub const fn initiate(local_node: UniqueNode, remote_node: UniqueNode, now: Duration) -> Self {
    Self { local_node, remote_node, started_at: now, state: HandshakeState::Initiated }
  }

  /// Returns the offer frame for this attempt.
  #[must_use]
  pub fn offer(&self) -> HandshakeFrame {
    HandshakeFrame::Offer { origin: self.local_node.clone(), target: self.remote_node.clone() }
  }

  /// Returns the node this attempt targets.
  #[must_use]
  pub const fn remote_node(&self) -> &UniqueNode {
    &self.remote_node
  }

  /// Returns the current state.
  #[must_use]
  pub const fn state(&self) -> &HandshakeState {
    &self.state
  }

  /// Returns `true` while a reply is still pending.
  #[must_use]
  pub const fn is_initiated(&self) -> bool {
    matches!(self.state, HandshakeState::Initiated)
  }

  /// Records the peer's acceptance. Later replies on a decided attempt are
  /// ignored.
  pub fn on_accept(&mut self, origin: UniqueNode) {
    if self.is_initiated() {
      self.state = HandshakeState::Completed(NegotiatedHandshake {
        local_node:  self.local_node.clone(),
        remote_node: origin,
      });
    }
  }

  /// Records the peer's rejection. Later replies on a decided attempt are
  /// ignored.
  pub fn on_reject(&mut self, reason: RejectReason, message: String) {
    if self.is_initiated() {
      self.state = HandshakeState::Rejected(HandshakeError::Rejected(reason, message));
    }
  }

  /// Marks the attempt as timed out when still undecided.
  pub fn on_timeout(&mut self) {
    if self.is_initiated() {
      self.state = HandshakeState::Rejected(HandshakeError::TimedOut);
    }
  }

  /// Returns `true` when the attempt is still undecided past its deadline.
  #[must_use]
  pub fn is_expired(&self, now: Duration, timeout: Duration) -> bool {
    self.is_initiated() && now.saturating_sub(self.started_at) >= timeout
  }
}
