//! Entry stored by dead letter sinks.

use core::time::Duration;

use super::reason::DeadLetterReason;
use crate::core::{
  actor_address::ActorAddress, serialized_message::SerializedMessage, system_message::SystemMessage,
  transport_envelope::TransportEnvelope,
};

/// The message an envelope was carrying when delivery became impossible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UndeliveredMessage {
  /// A serialized user message.
  User(SerializedMessage),
  /// A control-plane message.
  System(SystemMessage),
}

/// Captures a single undeliverable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadLetterEntry {
  message:   UndeliveredMessage,
  recipient: ActorAddress,
  reason:    DeadLetterReason,
  timestamp: Duration,
}

impl DeadLetterEntry {
  /// Creates a new entry.
  #[must_use]
  pub const fn new(
    message: UndeliveredMessage,
    recipient: ActorAddress,
    reason: DeadLetterReason,
    timestamp: Duration,
  ) -> Self {
    Self { message, recipient, reason, timestamp }
  }

  /// Builds an entry from an envelope whose write future has already been
  /// detached and failed.
  #[must_use]
  pub fn from_envelope(envelope: TransportEnvelope, reason: DeadLetterReason, timestamp: Duration) -> Self {
    match envelope {
      | TransportEnvelope::User { payload, recipient, .. } => {
        Self::new(UndeliveredMessage::User(payload), recipient, reason, timestamp)
      },
      | TransportEnvelope::System { message, recipient } => {
        Self::new(UndeliveredMessage::System(message), recipient, reason, timestamp)
      },
    }
  }

  /// Returns the undelivered message.
  #[must_use]
  pub const fn message(&self) -> &UndeliveredMessage {
    &self.message
  }

  /// Returns the intended recipient.
  #[must_use]
  pub const fn recipient(&self) -> &ActorAddress {
    &self.recipient
  }

  /// Returns the dead letter reason.
  #[must_use]
  pub const fn reason(&self) -> DeadLetterReason {
    self.reason
  }

  /// Returns the monotonic timestamp recorded at drop time.
  #[must_use]
  pub const fn timestamp(&self) -> Duration {
    self.timestamp
  }
}
