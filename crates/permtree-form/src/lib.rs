//! Permtree Form - the in-process hosting layer for the selection engine
//!
//! Glue between the ACL data source, the pure selection engine, and the
//! role mutation request:
//! - Parses the ACL query result into the core tree types
//! - Owns the mutable "current selection" cell (the engine stays pure)
//! - Projects the selection into `allowedResourceIds` /
//!   `intermediateResourceIds` for submission

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod editor;
pub mod error;
pub mod payload;
pub mod submit;

// Re-exports for convenience
pub use editor::AccessEditor;
pub use error::FormError;
pub use payload::AclPayload;
pub use submit::{AccessSubmission, RoleDraft};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
