//! Network endpoint identity of a cluster node.

use alloc::string::String;
use core::fmt;

/// Wire protocol identifier used when none is configured explicitly.
pub const DEFAULT_PROTOCOL: &str = "sact";

/// Network endpoint of a cluster node.
///
/// Two processes listening on the same endpoint share the same `Node`; they
/// are told apart by the [`NodeId`](crate::core::node_id::NodeId) carried in
/// a [`UniqueNode`](crate::core::unique_node::UniqueNode). All fields must be
/// non-empty and the port must be in `1..=65535`.
///
/// Field order matters: the derived ordering is the composite comparison
/// used for handshake tie-breaking.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
  protocol:    String,
  system_name: String,
  host:        String,
  port:        u16,
}

impl Node {
  /// Creates a node with the default `sact` protocol.
  #[must_use]
  pub fn new(system_name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
    Self {
      protocol:    String::from(DEFAULT_PROTOCOL),
      system_name: system_name.into(),
      host:        host.into(),
      port,
    }
  }

  /// Overrides the wire protocol identifier.
  #[must_use]
  pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
    self.protocol = protocol.into();
    self
  }

  /// Returns the wire protocol identifier.
  #[must_use]
  pub fn protocol(&self) -> &str {
    &self.protocol
  }

  /// Returns the actor system name.
  #[must_use]
  pub fn system_name(&self) -> &str {
    &self.system_name
  }

  /// Returns the host component.
  #[must_use]
  pub fn host(&self) -> &str {
    &self.host
  }

  /// Returns the port component.
  #[must_use]
  pub const fn port(&self) -> u16 {
    self.port
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}://{}@{}:{}", self.protocol, self.system_name, self.host, self.port)
  }
}
