//! Permtree Core - Tri-state permission tree selection
//!
//! The selection engine behind a Role & Access screen:
//! - Flattens an arbitrary-depth resource tree into an id-keyed index
//! - Seeds initial selection from persisted `isAllowed` grants
//! - Toggles nodes with downward and upward propagation
//! - Reports checked/indeterminate sets for rendering and submission
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use permtree_core::{ResourceIndex, ResourceNode, TreeSelection};
//!
//! let tree = vec![ResourceNode::new(1u64, "Reports")
//!     .with_child(ResourceNode::new(2u64, "Sales"))
//!     .with_child(ResourceNode::new(3u64, "Inventory"))];
//!
//! let index = Arc::new(ResourceIndex::build(&tree)?);
//! let selection = TreeSelection::new(index);
//!
//! // Checking one leaf leaves the parent partially selected.
//! let selection = selection.toggle(&2u64.into())?;
//! assert!(selection.is_checked(&2u64.into()));
//! assert!(selection.is_indeterminate(&1u64.into()));
//! # Ok::<(), permtree_core::TreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod index;
pub mod selection;
pub mod types;

// Re-exports for convenience
pub use error::TreeError;
pub use index::{IndexEntry, ResourceIndex};
pub use selection::{SelectionState, TreeSelection};
pub use types::{NodeState, ResourceId, ResourceNode};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the selection engine
    pub use crate::{
        NodeState, ResourceId, ResourceIndex, ResourceNode, SelectionState, TreeError,
        TreeSelection,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
