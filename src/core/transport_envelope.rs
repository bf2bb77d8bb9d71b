//! Unit crossing the wire between two associated nodes.

use alloc::vec::Vec;
use core::fmt;

use crate::core::{
  actor_address::ActorAddress,
  serialization_context::SerializationContext,
  serialized_message::SerializedMessage,
  system_message::SystemMessage,
  wire_format::{write_payload, write_u8},
  write_future::WriteFuture,
};

/// Wire tag for user message frames.
pub const USER_FRAME_TAG: u8 = 0x10;
/// Wire tag for system message frames.
pub const SYSTEM_FRAME_TAG: u8 = 0x11;

/// Envelope wrapping one outgoing message.
///
/// User envelopes may carry a write future that resolves when the channel
/// write completes, or fails when the envelope ends up in dead letters.
pub enum TransportEnvelope {
  /// An application-level message.
  User {
    /// Serialized message payload.
    payload:   SerializedMessage,
    /// Destination actor.
    recipient: ActorAddress,
    /// Optional completion notifier.
    ack:       Option<WriteFuture>,
  },
  /// A control-plane message.
  System {
    /// The system message.
    message:   SystemMessage,
    /// Destination actor.
    recipient: ActorAddress,
  },
}

impl TransportEnvelope {
  /// Creates a user envelope without a completion notifier.
  #[must_use]
  pub const fn user(payload: SerializedMessage, recipient: ActorAddress) -> Self {
    Self::User { payload, recipient, ack: None }
  }

  /// Creates a user envelope whose write future resolves on flush.
  #[must_use]
  pub const fn user_with_ack(payload: SerializedMessage, recipient: ActorAddress, ack: WriteFuture) -> Self {
    Self::User { payload, recipient, ack: Some(ack) }
  }

  /// Creates a system envelope.
  #[must_use]
  pub const fn system(message: SystemMessage, recipient: ActorAddress) -> Self {
    Self::System { message, recipient }
  }

  /// Returns the destination actor address.
  #[must_use]
  pub const fn recipient(&self) -> &ActorAddress {
    match self {
      | Self::User { recipient, .. } | Self::System { recipient, .. } => recipient,
    }
  }

  /// Removes and returns the attached write future, when present.
  pub fn take_ack(&mut self) -> Option<WriteFuture> {
    match self {
      | Self::User { ack, .. } => ack.take(),
      | Self::System { .. } => None,
    }
  }

  /// Encodes the envelope into a transport frame.
  #[must_use]
  pub fn encode_frame(&self, context: &SerializationContext) -> Vec<u8> {
    let mut buffer = Vec::new();
    match self {
      | Self::User { payload, recipient, .. } => {
        write_u8(&mut buffer, USER_FRAME_TAG);
        recipient.encode_into(&mut buffer, context);
        write_payload(&mut buffer, payload.bytes());
      },
      | Self::System { message, .. } => {
        write_u8(&mut buffer, SYSTEM_FRAME_TAG);
        message.encode_into(&mut buffer, context);
      },
    }
    buffer
  }
}

impl fmt::Debug for TransportEnvelope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::User { payload, recipient, ack } => f
        .debug_struct("User")
        .field("payload_len", &payload.len())
        .field("recipient", recipient)
        .field("has_ack", &ack.is_some())
        .finish(),
      | Self::System { message, recipient } => {
        f.debug_struct("System").field("message", message).field("recipient", recipient).finish()
      },
    }
  }
}
