// bst-rust/src/error.rs

use thiserror::Error;

/// Custom error type for the BST library.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BstError {
    /// A lookup missed. This is an expected outcome, not a fatal failure;
    /// callers may ignore it or branch on it.
    #[error("key not found in tree")]
    KeyNotFound,
}

/// Result type alias for BST operations.
pub type Result<T> = std::result::Result<T, BstError>;
