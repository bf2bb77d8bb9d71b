//! Binary representation of handshake frames.

use alloc::{string::String, vec::Vec};

use super::{kind::HandshakeKind, reject_reason::RejectReason};
use crate::core::{
  unique_node::UniqueNode,
  wire_error::WireError,
  wire_format::{read_u8, write_u8},
};

/// Control frame exchanged while establishing an association.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeFrame {
  /// Sent by the initiator to open an association.
  Offer {
    /// The initiating node.
    origin: UniqueNode,
    /// The node the initiator believes it is talking to.
    target: UniqueNode,
  },
  /// Sent by the acceptor when the offer is accepted.
  Accept {
    /// The accepting node.
    origin: UniqueNode,
  },
  /// Sent by the acceptor when the offer is rejected.
  Reject {
    /// Machine-readable reason.
    reason:  RejectReason,
    /// Human-readable detail.
    message: String,
  },
}

impl HandshakeFrame {
  /// Returns `true` when the tag byte denotes a handshake frame.
  #[must_use]
  pub const fn is_handshake_tag(tag: u8) -> bool {
    HandshakeKind::from_wire(tag).is_some()
  }

  /// Returns the frame kind.
  #[must_use]
  pub const fn kind(&self) -> HandshakeKind {
    match self {
      | Self::Offer { .. } => HandshakeKind::Offer,
      | Self::Accept { .. } => HandshakeKind::Accept,
      | Self::Reject { .. } => HandshakeKind::Reject,
    }
  }

  /// Encodes the frame into a transport payload.
  #[must_use]
  pub fn encode(&self) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_u8(&mut buffer, self.kind().to_wire());
    match self {
      | Self::Offer { origin, target } => {
        origin.encode_into(&mut buffer);
        target.encode_into(&mut buffer);
      },
      | Self::Accept { origin } => {
        origin.encode_into(&mut buffer);
      },
      | Self::Reject { reason, message } => {
        write_u8(&mut buffer, reason.to_wire());
        buffer.extend_from_slice(message.as_bytes());
      },
    }
    buffer
  }

  /// Decodes a handshake frame from a complete transport payload.
  ///
  /// # Errors
  ///
  /// Returns [`WireError`] when the payload is malformed.
  pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
    let mut cursor = 0;
    let tag = read_u8(bytes, &mut cursor)?;
    let Some(kind) = HandshakeKind::from_wire(tag) else {
      return Err(WireError::UnknownFrameTag(tag));
    };
    match kind {
      | HandshakeKind::Offer => {
        let origin = UniqueNode::decode(bytes, &mut cursor)?;
        let target = UniqueNode::decode(bytes, &mut cursor)?;
        Ok(Self::Offer { origin, target })
      },
      | HandshakeKind::Accept => {
        let origin = UniqueNode::decode(bytes, &mut cursor)?;
        Ok(Self::Accept { origin })
      },
      | HandshakeKind::Reject => {
        let code = read_u8(bytes, &mut cursor)?;
        let Some(reason) = RejectReason::from_wire(code) else {
          return Err(WireError::UnknownRejectReason(code));
        };
        let message = String::from_utf8(bytes[cursor..].to_vec())?;
        Ok(Self::Reject { reason, message })
      },
    }
  }
}
