//! Error types for the form layer

use permtree_core::TreeError;

/// Errors surfaced while loading or editing a Role & Access form
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The ACL query result could not be parsed
    #[error("malformed ACL payload: {0}")]
    Payload(String),

    /// The resource tree could not be flattened or edited
    #[error("invalid resource tree: {0}")]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_tree_errors() {
        let err: FormError = TreeError::NodeNotFound { id: 1u64.into() }.into();
        assert!(err.to_string().contains("invalid resource tree"));
    }
}
