//! Submission projection for role mutations
//!
//! The mutation collaborator reads the selection sets off the editor and
//! serializes them as-is; no further transformation happens here or there.

use permtree_core::{ResourceId, TreeSelection};
use serde::{Deserialize, Serialize};

/// The selection as a role mutation expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSubmission {
    /// Fully selected resource ids, sorted
    pub allowed_resource_ids: Vec<ResourceId>,
    /// Partially selected resource ids, sorted
    pub intermediate_resource_ids: Vec<ResourceId>,
}

impl AccessSubmission {
    /// Project a selection into its submission shape
    #[must_use]
    pub fn from_selection(selection: &TreeSelection) -> Self {
        Self {
            allowed_resource_ids: selection.allowed_resource_ids(),
            intermediate_resource_ids: selection.intermediate_resource_ids(),
        }
    }
}

/// Role create/update input assembled at submit time
///
/// The GraphQL transport itself lives outside this crate; this is only the
/// value the mutation request embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    /// Role display name
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The access selection being granted
    #[serde(flatten)]
    pub access: AccessSubmission,
}

impl RoleDraft {
    /// Create a draft for a new or updated role
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, access: AccessSubmission) -> Self {
        Self {
            name: name.into(),
            description: None,
            access,
        }
    }

    /// With a description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_draft_serializes_flat_camel_case() {
        let draft = RoleDraft::new(
            "Regional Manager",
            AccessSubmission {
                allowed_resource_ids: vec![2u64.into(), 9u64.into()],
                intermediate_resource_ids: vec![1u64.into()],
            },
        )
        .with_description("Franchise oversight");

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Regional Manager");
        assert_eq!(json["description"], "Franchise oversight");
        assert_eq!(json["allowedResourceIds"][0], 2);
        assert_eq!(json["intermediateResourceIds"][0], 1);
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let draft = RoleDraft::new(
            "Viewer",
            AccessSubmission {
                allowed_resource_ids: vec![],
                intermediate_resource_ids: vec![],
            },
        );
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("description").is_none());
    }
}
