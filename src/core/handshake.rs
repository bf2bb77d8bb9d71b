//! Handshake protocol establishing associations.

mod error;
mod frame;
mod kind;
mod reject_reason;
mod state;
#[cfg(test)]
mod tests;

pub use error::HandshakeError;
pub use frame::HandshakeFrame;
pub use kind::HandshakeKind;
pub use reject_reason::RejectReason;
pub use state::{HandshakeState, HandshakeStateMachine, NegotiatedHandshake};
