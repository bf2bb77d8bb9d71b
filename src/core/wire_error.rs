//! Error type produced while encoding or decoding wire frames.

use alloc::string::FromUtf8Error;
use core::fmt;

/// Describes a malformed or unencodable wire frame.
///
/// Any decode failure closes the connection it arrived on and rejects any
/// in-flight handshake bound to that connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireError {
  /// The payload ended before the expected field was complete.
  Truncated,
  /// The leading frame tag byte is not a known frame kind.
  UnknownFrameTag(u8),
  /// The system message discriminator is not a known message type.
  UnknownSystemMessage(u8),
  /// The reject reason code is not a known reason.
  UnknownRejectReason(u8),
  /// A string field did not contain valid UTF-8.
  InvalidUtf8,
  /// A field that must be non-empty was empty.
  EmptyField(&'static str),
  /// The port field was outside the valid range.
  InvalidPort,
  /// An address without a node was encoded outside a serialization context.
  MissingSerializationContext,
}

impl fmt::Display for WireError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Truncated => write!(f, "frame truncated"),
      | Self::UnknownFrameTag(tag) => write!(f, "unknown frame tag 0x{tag:02x}"),
      | Self::UnknownSystemMessage(kind) => write!(f, "unknown system message type {kind}"),
      | Self::UnknownRejectReason(code) => write!(f, "unknown reject reason code {code}"),
      | Self::InvalidUtf8 => write!(f, "string field is not valid UTF-8"),
      | Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
      | Self::InvalidPort => write!(f, "port must be in 1..=65535"),
      | Self::MissingSerializationContext => {
        write!(f, "address without a node encoded outside a serialization context")
      },
    }
  }
}

impl From<FromUtf8Error> for WireError {
  fn from(_: FromUtf8Error) -> Self {
    Self::InvalidUtf8
  }
}
