//! Decoded representation of a frame received from a peer.


use crate::core::{
  actor_address::ActorAddress,
  handshake::HandshakeFrame,
  serialized_message::SerializedMessage,
  system_message::SystemMessage,
  transport_envelope::{SYSTEM_FRAME_TAG, USER_FRAME_TAG},
  wire_error::WireError,
  wire_format::{read_payload, read_u8},
};

/// A frame decoded off the wire.
#[derive(Debug, PartialEq, Eq)]
pub enum InboundFrame {
  /// A handshake control frame.
  Handshake(HandshakeFrame),
  /// A user message addressed to a local actor.
  User {
    /// Destination actor.
    recipient: ActorAddress,
    /// Opaque payload for the codec collaborator.
    payload:   SerializedMessage,
  },
  /// A control-plane message.
  System(SystemMessage),
}

impl InboundFrame {
  /// Decodes a complete frame, dispatching on the leading tag byte.
  ///
  /// # Errors
  ///
  /// Returns [`WireError`] when the tag is unknown or the body is
  /// malformed; the connection carrying the frame must be closed.
  pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
    let mut cursor = 0;
    match read_u8(bytes, &mut cursor)? {
      | tag if HandshakeFrame::is_handshake_tag(tag) => Ok(Self::Handshake(HandshakeFrame::decode(bytes)?)),
      | USER_FRAME_TAG => {
        let recipient = ActorAddress::decode(bytes, &mut cursor)?;
        let payload = SerializedMessage::new(read_payload(bytes, &mut cursor)?);
        Ok(Self::User { recipient, payload })
      },
      | SYSTEM_FRAME_TAG => Ok(Self::System(SystemMessage::decode(bytes, &mut cursor)?)),
      | other => Err(WireError::UnknownFrameTag(other)),
    }
  }
}
