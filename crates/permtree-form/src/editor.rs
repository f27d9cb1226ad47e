//! Role & Access editor cell
//!
//! [`AccessEditor`] is the hosting layer's single mutable location: it holds
//! the current [`TreeSelection`], replaces it on every interaction, and keeps
//! the seeded state around for dirty tracking and reset.

use crate::error::FormError;
use crate::payload::AclPayload;
use crate::submit::AccessSubmission;
use permtree_core::{NodeState, ResourceId, ResourceIndex, TreeSelection};
use std::sync::Arc;

/// Stateful wrapper around the pure selection engine
#[derive(Debug, Clone)]
pub struct AccessEditor {
    seed: TreeSelection,
    current: TreeSelection,
}

impl AccessEditor {
    /// Build an editor from a parsed ACL payload
    ///
    /// Flattens the resource tree and seeds the selection from the payload's
    /// grant hints.
    ///
    /// # Errors
    /// Returns [`FormError::Tree`] when the tree carries a duplicate id.
    pub fn from_payload(payload: &AclPayload) -> Result<Self, FormError> {
        let index = Arc::new(ResourceIndex::build(&payload.resources)?);
        tracing::debug!(nodes = index.len(), "loaded role access editor");
        let seed = TreeSelection::seeded(index);
        Ok(Self {
            current: seed.clone(),
            seed,
        })
    }

    /// Forward one checkbox click into the engine
    ///
    /// # Errors
    /// Returns [`FormError::Tree`] for ids the tree never contained, so a
    /// programming error upstream is detected instead of losing the click.
    pub fn click(&mut self, id: &ResourceId) -> Result<(), FormError> {
        self.current = self.current.toggle(id)?;
        Ok(())
    }

    /// Check every resource
    pub fn select_all(&mut self) {
        self.current = self.current.select_all();
    }

    /// Uncheck everything
    pub fn clear(&mut self) {
        self.current = self.current.clear();
    }

    /// Discard edits, returning to the seeded state
    pub fn reset(&mut self) {
        self.current = self.seed.clone();
    }

    /// True when the selection differs from the seeded state
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.current.state() != self.seed.state()
    }

    /// The current selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &TreeSelection {
        &self.current
    }

    /// Tri-state of one node for rendering
    #[inline]
    #[must_use]
    pub fn state_of(&self, id: &ResourceId) -> NodeState {
        self.current.state_of(id)
    }

    /// The submission projection of the current selection
    #[must_use]
    pub fn submission(&self) -> AccessSubmission {
        AccessSubmission::from_selection(&self.current)
    }
}
