//! Core association primitives shared between std and no_std configurations.

mod actor_address;
mod association;
mod cluster_shell;
mod dead_letter;
mod handshake;
mod inbound_frame;
mod inbound_handler;
mod loopback_channel;
mod node;
mod node_id;
mod outbound_channel;
mod pending_queue;
mod send_error;
mod serialization_context;
mod serialized_message;
mod settings;
mod system_message;
mod tombstone;
mod tombstone_registry;
mod transport_envelope;
mod unique_node;
mod wire_error;
mod wire_format;
mod write_future;

pub use actor_address::ActorAddress;
pub use association::{Association, AssociationStateKind};
pub use cluster_shell::{ClusterShell, ClusterShellShared, RemotingLifecycleEvent, ShellEffect};
pub use dead_letter::{DeadLetterEntry, DeadLetterReason, DeadLetterSink, DeadLetters, UndeliveredMessage};
pub use handshake::{
  HandshakeError, HandshakeFrame, HandshakeKind, HandshakeState, HandshakeStateMachine, NegotiatedHandshake,
  RejectReason,
};
pub use inbound_frame::InboundFrame;
pub use inbound_handler::InboundHandler;
pub use loopback_channel::LoopbackChannel;
pub use node::{Node, DEFAULT_PROTOCOL};
pub use node_id::NodeId;
pub use outbound_channel::{ChannelError, OutboundChannel};
pub use pending_queue::PendingQueue;
pub use send_error::SendError;
pub use serialization_context::SerializationContext;
pub use serialized_message::SerializedMessage;
pub use settings::ClusterSettings;
pub use system_message::SystemMessage;
pub use tombstone::Tombstone;
pub use tombstone_registry::TombstoneRegistry;
pub use transport_envelope::{TransportEnvelope, SYSTEM_FRAME_TAG, USER_FRAME_TAG};
pub use unique_node::UniqueNode;
pub use wire_error::WireError;
pub use write_future::WriteFuture;
