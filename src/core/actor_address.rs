//! Cluster-wide actor address.

#[cfg(test)]
mod tests;

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::core::{
  serialization_context::SerializationContext,
  unique_node::UniqueNode,
  wire_error::WireError,
  wire_format::{read_nonempty_str, read_u16, read_u32, write_str, write_u16, write_u32},
};

/// Address of an actor within the cluster.
///
/// The path uniquely identifies an actor within `(node, incarnation)`. A
/// `None` node denotes an actor on the local node; the local node is
/// substituted from the serialization context at encode time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorAddress {
  node:        Option<UniqueNode>,
  path:        Vec<String>,
  incarnation: u32,
}

impl ActorAddress {
  /// Creates an address from its components. Segments must be non-empty.
  #[must_use]
  pub const fn new(node: Option<UniqueNode>, path: Vec<String>, incarnation: u32) -> Self {
    Self { node, path, incarnation }
  }

  /// Returns the node the actor lives on, when known.
  #[must_use]
  pub const fn node(&self) -> Option<&UniqueNode> {
    self.node.as_ref()
  }

  /// Returns the path segments.
  #[must_use]
  pub fn path(&self) -> &[String] {
    &self.path
  }

  /// Returns the actor incarnation.
  #[must_use]
  pub const fn incarnation(&self) -> u32 {
    self.incarnation
  }

  /// Appends the wire encoding, substituting the local node from the
  /// context when the address carries none.
  pub fn encode_into(&self, buffer: &mut Vec<u8>, context: &SerializationContext) {
    let node = self.node.as_ref().unwrap_or_else(|| context.local_node());
    node.encode_into(buffer);
    write_u16(buffer, self.path.len() as u16);
    for segment in &self.path {
      write_str(buffer, segment);
    }
    write_u32(buffer, self.incarnation);
  }

  /// Appends the wire encoding without a serialization context.
  ///
  /// # Errors
  ///
  /// Returns [`WireError::MissingSerializationContext`] when the address
  /// carries no node and no context is available to substitute one.
  pub fn encode_detached(&self, buffer: &mut Vec<u8>) -> Result<(), WireError> {
    let Some(node) = self.node.as_ref() else {
      return Err(WireError::MissingSerializationContext);
    };
    node.encode_into(buffer);
    write_u16(buffer, self.path.len() as u16);
    for segment in &self.path {
      write_str(buffer, segment);
    }
    write_u32(buffer, self.incarnation);
    Ok(())
  }

  /// Decodes an address starting at `cursor`. Decoded addresses always
  /// carry a node.
  ///
  /// # Errors
  ///
  /// Returns [`WireError`] when the payload is malformed or a path segment
  /// is empty.
  pub fn decode(bytes: &[u8], cursor: &mut usize) -> Result<Self, WireError> {
    let node = UniqueNode::decode(bytes, cursor)?;
    let segment_count = read_u16(bytes, cursor)? as usize;
    if segment_count == 0 {
      return Err(WireError::EmptyField("path"));
    }
    let mut path = Vec::with_capacity(segment_count);
    for _ in 0..segment_count {
      path.push(read_nonempty_str(bytes, cursor, "path segment")?);
    }
    let incarnation = read_u32(bytes, cursor)?;
    Ok(Self::new(Some(node), path, incarnation))
  }
}

impl fmt::Display for ActorAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.node.as_ref() {
      | Some(node) => write!(f, "{node}")?,
      | None => write!(f, "local")?,
    }
    for segment in &self.path {
      write!(f, "/{segment}")?;
    }
    write!(f, "#{}", self.incarnation)
  }
}
