//! Discriminates handshake frame types.

/// Identifies the type of a handshake frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeKind {
  /// Initial offer sent when establishing an association.
  Offer,
  /// Acceptance sent in response to an offer.
  Accept,
  /// Rejection sent in response to an offer.
  Reject,
}

impl HandshakeKind {
  /// Encodes the kind into the wire tag byte.
  #[must_use]
  pub const fn to_wire(self) -> u8 {
    match self {
      | Self::Offer => 0x01,
      | Self::Accept => 0x02,
      | Self::Reject => 0x03,
    }
  }

  /// Restores the handshake kind from the wire tag byte.
  #[must_use]
  pub const fn from_wire(value: u8) -> Option<Self> {
    match value {
      | 0x01 => Some(Self::Offer),
      | 0x02 => Some(Self::Accept),
      | 0x03 => Some(Self::Reject),
      | _ => None,
    }
  }
}
