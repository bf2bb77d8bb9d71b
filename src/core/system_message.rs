//! Control-plane messages exchanged between nodes.


use alloc::vec::Vec;

use crate::core::{
  actor_address::ActorAddress,
  serialization_context::SerializationContext,
  wire_error::WireError,
  wire_format::{read_bool, read_u8, write_bool, write_u8},
};

const TYPE_WATCH: u8 = 0;
const TYPE_TERMINATED: u8 = 1;

/// Messages carried on the system channel of an association.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemMessage {
  /// Registers `watcher` as a death watcher of `watchee`.
  Watch {
    /// Actor being watched.
    watchee: ActorAddress,
    /// Actor that registered the watch.
    watcher: ActorAddress,
  },
  /// Notifies a watcher that the watched actor terminated.
  Terminated {
    /// The terminated actor.
    reference:           ActorAddress,
    /// `true` when the actor was confirmed to have existed.
    existence_confirmed: bool,
    /// `true` when the whole remote address terminated.
    address_terminated:  bool,
  },
}

impl SystemMessage {
  /// Returns the address the message is concerned with.
  #[must_use]
  pub const fn subject(&self) -> &ActorAddress {
    match self {
      | Self::Watch { watchee, .. } => watchee,
      | Self::Terminated { reference, .. } => reference,
    }
  }

  /// Appends the wire encoding: the type discriminator followed by the
  /// message fields.
  pub fn encode_into(&self, buffer: &mut Vec<u8>, context: &SerializationContext) {
    match self {
      | Self::Watch { watchee, watcher } => {
        write_u8(buffer, TYPE_WATCH);
        watchee.encode_into(buffer, context);
        watcher.encode_into(buffer, context);
      },
      | Self::Terminated { reference, existence_confirmed, address_terminated } => {
        write_u8(buffer, TYPE_TERMINATED);
        reference.encode_into(buffer, context);
        write_bool(buffer, *existence_confirmed);
        write_bool(buffer, *address_terminated);
      },
    }
  }

  /// Decodes a system message starting at `cursor`.
  ///
  /// # Errors
  ///
  /// Returns [`WireError::UnknownSystemMessage`] for an unrecognised type
  /// discriminator; the receiver must fail the enclosing connection rather
  /// than skip the message.
  pub fn decode(bytes: &[u8], cursor: &mut usize) -> Result<Self, WireError> {
    match read_u8(bytes, cursor)? {
      | TYPE_WATCH => {
        let watchee = ActorAddress::decode(bytes, cursor)?;
        let watcher = ActorAddress::decode(bytes, cursor)?;
        Ok(Self::Watch { watchee, watcher })
      },
      | TYPE_TERMINATED => {
        let reference = ActorAddress::decode(bytes, cursor)?;
        let existence_confirmed = read_bool(bytes, cursor)?;
        let address_terminated = read_bool(bytes, cursor)?;
        Ok(Self::Terminated { reference, existence_confirmed, address_terminated })
      },
      | other => Err(WireError::UnknownSystemMessage(other)),
    }
  }
}
