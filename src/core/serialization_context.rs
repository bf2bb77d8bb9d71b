//! Ambient knowledge threaded explicitly through the codec.

use crate::core::unique_node::UniqueNode;

/// Serialization-time knowledge about the local node.
///
/// The context is passed as an explicit parameter rather than ambient state,
/// so callers that hold one can encode node-less addresses infallibly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationContext {
  local_node: UniqueNode,
}

impl SerializationContext {
  /// Creates a context for the given local node.
  #[must_use]
  pub const fn new(local_node: UniqueNode) -> Self {
    Self { local_node }
  }

  /// Returns the local node substituted into node-less addresses.
  #[must_use]
  pub const fn local_node(&self) -> &UniqueNode {
    &self.local_node
  }
}
