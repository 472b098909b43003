//! Error types for the skeleton subsystem.

use confkit_store::StoreError;
use thiserror::Error;

/// Errors that can occur while registering, loading or saving items.
#[derive(Error, Debug)]
pub enum SkeletonError {
    /// An item with the same name is already registered
    #[error("item already registered: {name}")]
    DuplicateItem {
        /// Name that collided
        name: String,
    },

    /// The save hook refused the save
    #[error("save rejected by hook")]
    SaveRejected,

    /// The backing store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for skeleton operations.
pub type Result<T> = std::result::Result<T, SkeletonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SkeletonError::DuplicateItem {
            name: "Enabled".to_string(),
        };
        assert_eq!(err.to_string(), "item already registered: Enabled");
    }

    #[test]
    fn test_error_from_store() {
        let err: SkeletonError = StoreError::Immutable {
            path: "/etc/demorc".to_string(),
        }
        .into();
        assert!(matches!(err, SkeletonError::Store(_)));
        assert!(err.to_string().contains("immutable"));
    }
}
