#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(test), no_std)]

//! Remote association subsystem for the sactor actor runtime.
//!
//! Establishes, maintains, and tears down the bidirectional channel between
//! two cluster nodes; every remote message flows through an [`Association`]
//! owned by the [`ClusterShell`].

extern crate alloc;

mod core;
#[cfg(feature = "std")]
mod std;

pub use crate::core::{
  ActorAddress, Association, AssociationStateKind, ChannelError, ClusterSettings, ClusterShell, ClusterShellShared,
  DeadLetterEntry, DeadLetterReason, DeadLetterSink, DeadLetters, HandshakeError, HandshakeFrame, HandshakeKind,
  HandshakeState, HandshakeStateMachine, InboundFrame, InboundHandler, LoopbackChannel, NegotiatedHandshake, Node,
  NodeId, OutboundChannel, PendingQueue, RejectReason, RemotingLifecycleEvent, SendError, SerializationContext,
  SerializedMessage, ShellEffect, SystemMessage, Tombstone, TombstoneRegistry, TransportEnvelope,
  UndeliveredMessage, UniqueNode, WireError, WriteFuture, DEFAULT_PROTOCOL, SYSTEM_FRAME_TAG, USER_FRAME_TAG,
};

#[cfg(feature = "std")]
pub use crate::std::{MonotonicClock, TracingDeadLetterSink};

#[cfg(feature = "tokio-transport")]
pub use crate::std::{RemotingDriver, TcpChannel};
