//! ACL query payload ingestion
//!
//! The data-loading collaborator hands the form a JSON document with the
//! resource hierarchy and per-node grant flags; this module deserializes it
//! into the core tree types.

use crate::error::FormError;
use permtree_core::ResourceNode;
use serde::{Deserialize, Serialize};

/// Deserialized ACL query result: the resource hierarchy with grant hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclPayload {
    /// Root resources of the permission hierarchy
    #[serde(default)]
    pub resources: Vec<ResourceNode>,
}

impl AclPayload {
    /// Wrap an already-built tree
    #[inline]
    #[must_use]
    pub fn new(resources: Vec<ResourceNode>) -> Self {
        Self { resources }
    }

    /// Parse the raw ACL query result
    ///
    /// # Errors
    /// Returns [`FormError::Payload`] when the document does not match the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, FormError> {
        let payload: Self =
            serde_json::from_str(raw).map_err(|e| FormError::Payload(e.to_string()))?;
        tracing::debug!(roots = payload.resources.len(), "parsed ACL payload");
        Ok(payload)
    }
}
