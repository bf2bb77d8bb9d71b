//! Seam through which decoded messages reach the actor tree.

use crate::core::{actor_address::ActorAddress, serialized_message::SerializedMessage, system_message::SystemMessage};

/// Consumer of messages decoded off an established association.
///
/// Implemented by the surrounding runtime; the mailbox scheduler and codec
/// live behind this trait.
pub trait InboundHandler: Send + Sync {
  /// Delivers a user message to the addressed local actor.
  fn handle_user(&self, recipient: ActorAddress, payload: SerializedMessage);

  /// Delivers a control-plane message.
  fn handle_system(&self, message: SystemMessage);
}
