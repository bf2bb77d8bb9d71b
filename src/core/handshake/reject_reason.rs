//! Reasons carried by handshake rejections.

use core::fmt;

/// Why an offer was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
  /// An association with the offering node already exists.
  Duplicate,
  /// A concurrent handshake in the other direction won the tie-break.
  ConcurrentLost,
  /// The offering node is tombstoned on the accepting side.
  Tombstoned,
  /// The offer's target does not match the accepting node.
  WrongTarget,
  /// Any other failure, described by the reject message.
  Other,
}

impl RejectReason {
  /// Encodes the reason into its wire code.
  #[must_use]
  pub const fn to_wire(self) -> u8 {
    match self {
      | Self::Duplicate => 1,
      | Self::ConcurrentLost => 2,
      | Self::Tombstoned => 3,
      | Self::WrongTarget => 4,
      | Self::Other => 5,
    }
  }

  /// Restores the reason from its wire code.
  #[must_use]
  pub const fn from_wire(value: u8) -> Option<Self> {
    match value {
      | 1 => Some(Self::Duplicate),
      | 2 => Some(Self::ConcurrentLost),
      | 3 => Some(Self::Tombstoned),
      | 4 => Some(Self::WrongTarget),
      | 5 => Some(Self::Other),
      | _ => None,
    }
  }
}

impl fmt::Display for RejectReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Duplicate => write!(f, "duplicate"),
      | Self::ConcurrentLost => write!(f, "concurrent handshake lost"),
      | Self::Tombstoned => write!(f, "tombstoned"),
      | Self::WrongTarget => write!(f, "wrong target"),
      | Self::Other => write!(f, "other"),
    }
  }
}
