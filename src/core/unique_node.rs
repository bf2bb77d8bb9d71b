//! Endpoint identity combined with the process incarnation tag.


use alloc::vec::Vec;
use core::fmt;

use crate::core::{
  node::Node,
  node_id::NodeId,
  wire_error::WireError,
  wire_format::{read_nonempty_str, read_u16, read_u32, write_str, write_u16, write_u32},
};

/// A network endpoint together with the incarnation tag of the process
/// listening on it.
///
/// Equality considers all five fields. A restarted process on the same
/// endpoint produces a different `UniqueNode` and is treated as a distinct
/// peer. The derived ordering (protocol, system name, host, port, nid) is
/// the composite comparison used for handshake tie-breaking.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueNode {
  node: Node,
  nid:  NodeId,
}

impl UniqueNode {
  /// Creates a unique node from its endpoint and incarnation tag.
  #[must_use]
  pub const fn new(node: Node, nid: NodeId) -> Self {
    Self { node, nid }
  }

  /// Returns the network endpoint.
  #[must_use]
  pub const fn node(&self) -> &Node {
    &self.node
  }

  /// Returns the incarnation tag.
  #[must_use]
  pub const fn nid(&self) -> NodeId {
    self.nid
  }

  /// Returns `true` when `other` reuses this endpoint under a different
  /// incarnation tag.
  #[must_use]
  pub fn is_other_incarnation_of(&self, other: &Self) -> bool {
    self.node == other.node && self.nid != other.nid
  }

  /// Appends the wire encoding: the ordered five-tuple of protocol, system
  /// name, host, port and nid.
  pub fn encode_into(&self, buffer: &mut Vec<u8>) {
    write_str(buffer, self.node.protocol());
    write_str(buffer, self.node.system_name());
    write_str(buffer, self.node.host());
    write_u16(buffer, self.node.port());
    write_u32(buffer, self.nid.value());
  }

  /// Decodes a unique node starting at `cursor`.
  ///
  /// # Errors
  ///
  /// Returns [`WireError`] when a field is truncated, empty, or the port is
  /// out of range.
  pub fn decode(bytes: &[u8], cursor: &mut usize) -> Result<Self, WireError> {
    let protocol = read_nonempty_str(bytes, cursor, "protocol")?;
    let system_name = read_nonempty_str(bytes, cursor, "system_name")?;
    let host = read_nonempty_str(bytes, cursor, "host")?;
    let port = read_u16(bytes, cursor)?;
    if port == 0 {
      return Err(WireError::InvalidPort);
    }
    let nid = NodeId::new(read_u32(bytes, cursor)?);
    Ok(Self::new(Node::new(system_name, host, port).with_protocol(protocol), nid))
  }
}

impl fmt::Display for UniqueNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.node, self.nid)
  }
}
