//! Core types for the permission tree
//!
//! Defines the resource hierarchy consumed by the selection engine:
//! - Resource identifiers (numeric or string, canonicalized at ingestion)
//! - Resource tree nodes
//! - Tri-state node classification

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Resource identifier
///
/// ACL payloads mix numeric and string ids. Both deserialize into this one
/// sum type at the ingestion boundary, so every later comparison is an exact
/// match on the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric id (database primary keys)
    Num(u64),
    /// String id (slugs, external references)
    Text(String),
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A node in the permission hierarchy
///
/// The tree is supplied once per engine instance and treated as immutable;
/// structural edits require constructing a new engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    /// Unique id across the whole tree
    pub id: ResourceId,
    /// Display label; not consulted by the selection algorithm
    pub name: String,
    /// Ordered children; a node with no children is a leaf
    #[serde(default)]
    pub children: Vec<ResourceNode>,
    /// Persisted grant hint, consumed only when seeding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_allowed: Option<bool>,
}

impl ResourceNode {
    /// Create a leaf node
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
            is_allowed: None,
        }
    }

    /// Mark the node as granted in the persisted source
    #[inline]
    #[must_use]
    pub fn allowed(mut self) -> Self {
        self.is_allowed = Some(true);
        self
    }

    /// Append one child
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: ResourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the child list
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<ResourceNode>) -> Self {
        self.children = children;
        self
    }

    /// True when the node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Tri-state classification of one node for checkbox rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeState {
    /// Neither the node nor any descendant is selected
    Unchecked,
    /// Some but not all of the subtree is selected
    Indeterminate,
    /// The node and, transitively, all descendants are selected
    Checked,
}
