//! Node identity and structural role

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a model node
///
/// Identifiers are caller-assigned strings recorded as-is by the store.
/// Nodes created locally before their first export can use [`generate`]
/// for a fresh time-sortable id.
///
/// [`generate`]: NodeId::generate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create an ID from an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new unique node ID using UUID v7 (time-sortable)
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the identifier string is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Structural role of a node, fixed at construction
///
/// Diagram children (graphical representations and connections owned by a
/// diagram) have no independent version authority in the store. The diagram
/// object itself is `Standalone`: it owns its own row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Model elements, relations, folders, and diagram objects themselves
    #[default]
    Standalone,
    /// Graphical representation or connection owned by a diagram
    DiagramChild,
}

impl NodeRole {
    /// Whether version and update queries defer to the owning diagram
    #[must_use]
    pub const fn delegates_to_diagram(self) -> bool {
        matches!(self, Self::DiagramChild)
    }
}

/// The contract a node type must expose to participate in synchronization
///
/// Implementations hand over everything a metadata record captures at
/// construction: identity, naming, and structural role. The identifier,
/// type name, and display name must be stable for the node's lifetime.
pub trait ModelNode {
    /// Stable identifier recorded in the store
    fn node_id(&self) -> &NodeId;

    /// Node type name (e.g. `ApplicationComponent`)
    fn type_name(&self) -> &str;

    /// Human-readable display name
    fn display_name(&self) -> &str;

    /// Structural role, fixed for the node's lifetime
    fn role(&self) -> NodeRole;

    /// Owning diagram, set only for diagram children
    fn parent_diagram(&self) -> Option<&NodeId> {
        None
    }
}

/// Plain value implementation of [`ModelNode`]
///
/// For callers and tests that track nodes outside a richer model-graph type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    id: NodeId,
    type_name: String,
    display_name: String,
    role: NodeRole,
    parent_diagram: Option<NodeId>,
}

impl NodeDescriptor {
    /// Create a standalone node descriptor
    pub fn new(
        id: impl Into<NodeId>,
        type_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            display_name: display_name.into(),
            role: NodeRole::Standalone,
            parent_diagram: None,
        }
    }

    /// Set the structural role
    #[must_use]
    pub const fn with_role(mut self, role: NodeRole) -> Self {
        self.role = role;
        self
    }

    /// Set the owning diagram
    #[must_use]
    pub fn with_parent_diagram(mut self, parent: NodeId) -> Self {
        self.parent_diagram = Some(parent);
        self
    }
}

impl ModelNode for NodeDescriptor {
    fn node_id(&self) -> &NodeId {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn role(&self) -> NodeRole {
        self.role
    }

    fn parent_diagram(&self) -> Option<&NodeId> {
        self.parent_diagram.as_ref()
    }
}
