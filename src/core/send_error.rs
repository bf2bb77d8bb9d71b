//! Errors surfaced through write futures.

use core::fmt;

use crate::core::outbound_channel::ChannelError;

/// Why an envelope's write future failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendError {
  /// The association was terminated; the envelope went to dead letters.
  AssociationTerminated,
  /// The transport failed to write the envelope. The association itself is
  /// unaffected; reconnection policy is the transport's concern.
  ChannelWrite(ChannelError),
}

impl fmt::Display for SendError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::AssociationTerminated => write!(f, "association terminated"),
      | Self::ChannelWrite(error) => write!(f, "channel write failed: {error}"),
    }
  }
}

impl From<ChannelError> for SendError {
  fn from(value: ChannelError) -> Self {
    Self::ChannelWrite(value)
  }
}
