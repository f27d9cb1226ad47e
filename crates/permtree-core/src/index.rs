//! Flattened resource index
//!
//! Provides [`ResourceIndex`], the id-keyed view of one resource tree with
//! O(1) parent and child lookup. Built once per tree instance and read-only
//! thereafter; entries iterate in depth-first tree order.

use crate::error::TreeError;
use crate::types::{ResourceId, ResourceNode};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Direct-child id list; permission trees branch shallowly
type ChildIds = SmallVec<[ResourceId; 4]>;

/// One flattened entry: parent linkage plus the node data the engine reads
#[derive(Debug, Clone)]
pub struct IndexEntry {
    name: String,
    parent: Option<ResourceId>,
    children: ChildIds,
    allowed_hint: bool,
}

impl IndexEntry {
    /// Display label of the node
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent id, or `None` for roots
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&ResourceId> {
        self.parent.as_ref()
    }

    /// Direct children in tree order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ResourceId] {
        &self.children
    }

    /// True when the node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Persisted grant hint from the source tree
    #[inline]
    #[must_use]
    pub fn allowed_hint(&self) -> bool {
        self.allowed_hint
    }
}

/// Id-keyed flattening of a resource tree
///
/// Every node of the input, at every depth, gets exactly one entry. The
/// index rejects duplicate ids at build time instead of silently letting a
/// later occurrence win.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    entries: IndexMap<ResourceId, IndexEntry>,
    roots: Vec<ResourceId>,
}

impl ResourceIndex {
    /// Flatten a root sequence into an id-keyed index
    ///
    /// An empty input yields an empty index, not an error.
    ///
    /// # Errors
    /// Returns [`TreeError::DuplicateNodeId`] if any id appears twice.
    pub fn build(roots: &[ResourceNode]) -> Result<Self, TreeError> {
        let mut index = Self::default();
        for root in roots {
            index.roots.push(root.id.clone());
            index.insert_subtree(root, None)?;
        }
        tracing::debug!(
            nodes = index.entries.len(),
            roots = index.roots.len(),
            "flattened resource tree"
        );
        Ok(index)
    }

    fn insert_subtree(
        &mut self,
        node: &ResourceNode,
        parent: Option<&ResourceId>,
    ) -> Result<(), TreeError> {
        if self.entries.contains_key(&node.id) {
            return Err(TreeError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }

        let children: ChildIds = node.children.iter().map(|c| c.id.clone()).collect();
        self.entries.insert(
            node.id.clone(),
            IndexEntry {
                name: node.name.clone(),
                parent: parent.cloned(),
                children,
                allowed_hint: node.is_allowed.unwrap_or(false),
            },
        );

        for child in &node.children {
            self.insert_subtree(child, Some(&node.id))?;
        }
        Ok(())
    }

    /// Lookup one entry
    #[inline]
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// True when the id exists in the tree
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.entries.contains_key(id)
    }

    /// Parent of a node, or `None` for roots and unknown ids
    #[inline]
    #[must_use]
    pub fn parent_of(&self, id: &ResourceId) -> Option<&ResourceId> {
        self.entries.get(id).and_then(IndexEntry::parent)
    }

    /// Direct children of a node; empty for leaves and unknown ids
    #[inline]
    #[must_use]
    pub fn children_of(&self, id: &ResourceId) -> &[ResourceId] {
        self.entries
            .get(id)
            .map(IndexEntry::children)
            .unwrap_or(&[])
    }

    /// True when the node has no children; unknown ids read as leaves
    #[inline]
    #[must_use]
    pub fn is_leaf(&self, id: &ResourceId) -> bool {
        self.children_of(id).is_empty()
    }

    /// Root ids in input order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[ResourceId] {
        &self.roots
    }

    /// All ids in depth-first tree order
    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.entries.keys()
    }

    /// Ids whose source node carried `isAllowed == true`
    pub fn allowed_ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.allowed_hint)
            .map(|(id, _)| id)
    }

    /// Every id below a node, at any depth; the node itself is excluded
    #[must_use]
    pub fn descendants_of(&self, id: &ResourceId) -> Vec<ResourceId> {
        let mut collected = Vec::new();
        let mut stack: Vec<&ResourceId> = self.children_of(id).iter().collect();
        while let Some(current) = stack.pop() {
            collected.push(current.clone());
            stack.extend(self.children_of(current));
        }
        collected
    }

    /// Total node count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the tree had no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
