//! Tri-state selection state machine
//!
//! [`TreeSelection`] owns the derived checked/indeterminate sets for one
//! resource tree. Every operation is a pure transition: it returns the
//! successor selection and leaves `self` untouched, so the hosting layer
//! owns the single mutable cell and re-renders on replacement.

use crate::error::TreeError;
use crate::index::ResourceIndex;
use crate::types::{NodeState, ResourceId};
use std::collections::HashSet;
use std::sync::Arc;

/// The mutable part of the engine: which ids are fully or partially selected
///
/// Invariants upheld by every transition:
/// - `checked` and `indeterminate` are disjoint
/// - a leaf never appears in `indeterminate`
/// - every non-leaf's membership is a pure function of its direct children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    checked: HashSet<ResourceId>,
    indeterminate: HashSet<ResourceId>,
}

impl SelectionState {
    /// Ids that are fully selected
    #[inline]
    #[must_use]
    pub fn checked(&self) -> &HashSet<ResourceId> {
        &self.checked
    }

    /// Ids that are partially selected
    #[inline]
    #[must_use]
    pub fn indeterminate(&self) -> &HashSet<ResourceId> {
        &self.indeterminate
    }
}

/// Tri-state selection over one flattened resource tree
///
/// The index is shared read-only; independent widgets over the same tree
/// each hold their own `TreeSelection`.
#[derive(Debug, Clone)]
pub struct TreeSelection {
    index: Arc<ResourceIndex>,
    state: SelectionState,
}

impl TreeSelection {
    /// Empty selection over the given index
    #[inline]
    #[must_use]
    pub fn new(index: Arc<ResourceIndex>) -> Self {
        Self {
            index,
            state: SelectionState::default(),
        }
    }

    /// Selection seeded from the tree's persisted grant hints
    ///
    /// Starts from the ids whose `isAllowed` was true, then replays the
    /// ancestor reclassification bottom-up over the whole tree. The seeded
    /// state is exactly what the same grants would produce through toggles;
    /// a non-leaf's own hint is overridden by what its children derive.
    #[must_use]
    pub fn seeded(index: Arc<ResourceIndex>) -> Self {
        let mut selection = Self::new(index);
        let allowed: Vec<ResourceId> = selection.index.allowed_ids().cloned().collect();
        for id in allowed {
            selection.state.checked.insert(id);
        }

        // Entries iterate in depth-first order, so the reverse visits
        // children before their parents.
        let ids: Vec<ResourceId> = selection.index.ids().cloned().collect();
        for id in ids.iter().rev() {
            selection.reclassify(id);
        }
        tracing::debug!(
            checked = selection.state.checked.len(),
            indeterminate = selection.state.indeterminate.len(),
            "seeded selection from grant hints"
        );
        selection
    }

    /// Toggle one node, returning the successor selection
    ///
    /// A checked or indeterminate node becomes unchecked with its whole
    /// subtree; an unchecked node becomes fully checked with its whole
    /// subtree. Ancestors up to the root are then reclassified from their
    /// direct children. Indeterminate is never assigned directly; it only
    /// arises from this upward pass.
    ///
    /// # Errors
    /// Returns [`TreeError::NodeNotFound`] for ids absent from the tree.
    pub fn toggle(&self, id: &ResourceId) -> Result<Self, TreeError> {
        if !self.index.contains(id) {
            return Err(TreeError::NodeNotFound { id: id.clone() });
        }

        let make_checked =
            !self.state.checked.contains(id) && !self.state.indeterminate.contains(id);

        let mut next = self.clone();
        next.apply_subtree(id, make_checked);
        next.reclassify_ancestors(id);
        tracing::debug!(%id, checked = make_checked, "toggled node");
        Ok(next)
    }

    /// Successor with every node checked
    #[must_use]
    pub fn select_all(&self) -> Self {
        let mut next = self.clone();
        next.state.checked = self.index.ids().cloned().collect();
        next.state.indeterminate.clear();
        next
    }

    /// Successor with nothing selected
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new(Arc::clone(&self.index))
    }

    /// Tri-state of one node; unknown ids read as unchecked
    #[must_use]
    pub fn state_of(&self, id: &ResourceId) -> NodeState {
        if self.state.checked.contains(id) {
            NodeState::Checked
        } else if self.state.indeterminate.contains(id) {
            NodeState::Indeterminate
        } else {
            NodeState::Unchecked
        }
    }

    /// True when the node is fully selected
    #[inline]
    #[must_use]
    pub fn is_checked(&self, id: &ResourceId) -> bool {
        self.state.checked.contains(id)
    }

    /// True when the node is partially selected
    #[inline]
    #[must_use]
    pub fn is_indeterminate(&self, id: &ResourceId) -> bool {
        self.state.indeterminate.contains(id)
    }

    /// The current checked/indeterminate sets
    #[inline]
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The shared flattened index
    #[inline]
    #[must_use]
    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    /// Ids currently checked, in no particular order
    pub fn checked_ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.state.checked.iter()
    }

    /// Ids currently indeterminate, in no particular order
    pub fn indeterminate_ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.state.indeterminate.iter()
    }

    /// Checked ids, sorted for deterministic submission payloads
    #[must_use]
    pub fn allowed_resource_ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.state.checked.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Indeterminate ids, sorted for deterministic submission payloads
    #[must_use]
    pub fn intermediate_resource_ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.state.indeterminate.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Apply one pure state to a node and its entire subtree
    fn apply_subtree(&mut self, id: &ResourceId, checked: bool) {
        let index = Arc::clone(&self.index);
        let mut targets = index.descendants_of(id);
        targets.push(id.clone());

        for target in targets {
            if checked {
                self.state.checked.insert(target.clone());
            } else {
                self.state.checked.remove(&target);
            }
            self.state.indeterminate.remove(&target);
        }
    }

    /// Walk from the node's parent to the root, reclassifying each ancestor
    ///
    /// Every ancestor on the path is revisited: a flip at one level can
    /// change the classification of the level above.
    fn reclassify_ancestors(&mut self, id: &ResourceId) {
        let index = Arc::clone(&self.index);
        let mut current = index.parent_of(id).cloned();
        while let Some(ancestor) = current {
            self.reclassify(&ancestor);
            current = index.parent_of(&ancestor).cloned();
        }
    }

    /// Derive one node's membership from its direct children
    ///
    /// Leaves keep their pure state; only non-leaves are derived.
    fn reclassify(&mut self, id: &ResourceId) {
        let (has_children, all_checked, any_marked) = {
            let children = self.index.children_of(id);
            let mut all_checked = !children.is_empty();
            let mut any_marked = false;
            for child in children {
                let checked = self.state.checked.contains(child);
                let marked = checked || self.state.indeterminate.contains(child);
                all_checked &= checked;
                any_marked |= marked;
            }
            (!children.is_empty(), all_checked, any_marked)
        };
        if !has_children {
            return;
        }

        self.state.checked.remove(id);
        self.state.indeterminate.remove(id);
        if all_checked {
            self.state.checked.insert(id.clone());
        } else if any_marked {
            self.state.indeterminate.insert(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceNode;

    fn leaf(id: u64, name: &str) -> ResourceNode {
        ResourceNode::new(id, name)
    }

    fn branch(id: u64, name: &str, children: Vec<ResourceNode>) -> ResourceNode {
        ResourceNode::new(id, name).with_children(children)
    }

    fn selection_over(tree: Vec<crate::types::ResourceNode>) -> TreeSelection {
        let index = Arc::new(ResourceIndex::build(&tree).unwrap());
        TreeSelection::new(index)
    }

    #[test]
    fn toggle_leaf_marks_parent_indeterminate() {
        let selection = selection_over(vec![branch(
            1,
            "A",
            vec![leaf(2, "B"), leaf(3, "C")],
        )]);

        let next = selection.toggle(&2u64.into()).unwrap();
        assert_eq!(next.state_of(&2u64.into()), NodeState::Checked);
        assert_eq!(next.state_of(&1u64.into()), NodeState::Indeterminate);
        assert_eq!(next.state_of(&3u64.into()), NodeState::Unchecked);
    }

    #[test]
    fn toggle_last_sibling_completes_parent() {
        let selection = selection_over(vec![branch(
            1,
            "A",
            vec![leaf(2, "B"), leaf(3, "C")],
        )]);

        let next = selection
            .toggle(&2u64.into())
            .unwrap()
            .toggle(&3u64.into())
            .unwrap();
        assert!(next.is_checked(&1u64.into()));
        assert!(next.is_checked(&2u64.into()));
        assert!(next.is_checked(&3u64.into()));
        assert!(next.state().indeterminate().is_empty());
    }

    #[test]
    fn toggle_branch_cascades_down() {
        let selection = selection_over(vec![branch(
            1,
            "A",
            vec![branch(2, "B", vec![leaf(3, "D"), leaf(4, "E")])],
        )]);

        let checked = selection.toggle(&2u64.into()).unwrap();
        for id in [1u64, 2, 3, 4] {
            assert!(checked.is_checked(&id.into()), "{id} should be checked");
        }

        let cleared = checked.toggle(&2u64.into()).unwrap();
        assert!(cleared.state().checked().is_empty());
        assert!(cleared.state().indeterminate().is_empty());
    }

    #[test]
    fn toggle_indeterminate_node_unchecks_subtree() {
        let selection = selection_over(vec![branch(
            1,
            "A",
            vec![leaf(2, "B"), leaf(3, "C")],
        )]);

        let partial = selection.toggle(&2u64.into()).unwrap();
        assert!(partial.is_indeterminate(&1u64.into()));

        let cleared = partial.toggle(&1u64.into()).unwrap();
        assert!(cleared.state().checked().is_empty());
        assert!(cleared.state().indeterminate().is_empty());
    }

    #[test]
    fn toggle_unknown_id_is_an_error() {
        let selection = selection_over(vec![leaf(1, "only")]);
        let err = selection.toggle(&99u64.into()).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound { id: 99u64.into() });
    }

    #[test]
    fn toggle_on_empty_tree_is_an_error() {
        let selection = selection_over(vec![]);
        assert!(matches!(
            selection.toggle(&1u64.into()),
            Err(TreeError::NodeNotFound { .. })
        ));
        assert!(selection.state().checked().is_empty());
    }

    #[test]
    fn toggle_does_not_mutate_the_receiver() {
        let selection = selection_over(vec![leaf(1, "only")]);
        let _ = selection.toggle(&1u64.into()).unwrap();
        assert_eq!(selection.state_of(&1u64.into()), NodeState::Unchecked);
    }

    #[test]
    fn seed_derives_ancestors_from_hints() {
        let tree = vec![branch(
            1,
            "A",
            vec![branch(2, "B", vec![leaf(3, "D").allowed(), leaf(4, "E")])],
        )];
        let index = Arc::new(ResourceIndex::build(&tree).unwrap());
        let seeded = TreeSelection::seeded(index);

        assert_eq!(seeded.state_of(&3u64.into()), NodeState::Checked);
        assert_eq!(seeded.state_of(&2u64.into()), NodeState::Indeterminate);
        assert_eq!(seeded.state_of(&1u64.into()), NodeState::Indeterminate);
        assert_eq!(seeded.state_of(&4u64.into()), NodeState::Unchecked);
    }

    #[test]
    fn seed_promotes_fully_granted_branches() {
        let tree = vec![branch(
            1,
            "A",
            vec![leaf(2, "B").allowed(), leaf(3, "C").allowed()],
        )];
        let index = Arc::new(ResourceIndex::build(&tree).unwrap());
        let seeded = TreeSelection::seeded(index);

        assert!(seeded.is_checked(&1u64.into()));
        assert!(seeded.state().indeterminate().is_empty());
    }

    #[test]
    fn seed_overrides_stale_branch_hint() {
        // The branch was granted in a previous save, but one child has
        // since lost its grant; the branch derives indeterminate.
        let tree = vec![branch(
            1,
            "A",
            vec![leaf(2, "B").allowed(), leaf(3, "C")],
        )
        .allowed()];
        let index = Arc::new(ResourceIndex::build(&tree).unwrap());
        let seeded = TreeSelection::seeded(index);

        assert_eq!(seeded.state_of(&1u64.into()), NodeState::Indeterminate);
        assert!(seeded.is_checked(&2u64.into()));
    }

    #[test]
    fn select_all_and_clear() {
        let selection = selection_over(vec![branch(
            1,
            "A",
            vec![leaf(2, "B"), leaf(3, "C")],
        )]);

        let all = selection.select_all();
        assert_eq!(all.state().checked().len(), 3);
        assert!(all.state().indeterminate().is_empty());

        let none = all.clear();
        assert!(none.state().checked().is_empty());
        assert!(none.state().indeterminate().is_empty());
    }

    #[test]
    fn submission_projections_are_sorted() {
        let selection = selection_over(vec![
            branch(5, "E", vec![leaf(4, "D"), leaf(9, "I")]),
            leaf(2, "B"),
        ]);

        let next = selection
            .toggle(&9u64.into())
            .unwrap()
            .toggle(&2u64.into())
            .unwrap();
        assert_eq!(next.allowed_resource_ids(), vec![2u64.into(), 9u64.into()]);
        assert_eq!(next.intermediate_resource_ids(), vec![5u64.into()]);
    }
}
