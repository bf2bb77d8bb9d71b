//! Failure reported for an unsuccessful handshake attempt.

use alloc::string::String;
use core::fmt;

use super::reject_reason::RejectReason;

/// Why an outbound handshake attempt did not complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeError {
  /// The peer rejected the offer.
  Rejected(RejectReason, String),
  /// No reply arrived within the handshake timeout.
  TimedOut,
}

impl fmt::Display for HandshakeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Rejected(reason, message) if message.is_empty() => write!(f, "offer rejected: {reason}"),
      | Self::Rejected(reason, message) => write!(f, "offer rejected: {reason} ({message})"),
      | Self::TimedOut => write!(f, "handshake timed out"),
    }
  }
}
