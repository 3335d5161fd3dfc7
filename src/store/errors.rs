//! # Store Errors
//!
//! Error types for the item storage adapter.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Item storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item resolves to the given storage key
    #[error("Item not found")]
    NotFound,

    /// Storage key is not a structurally valid ObjectId
    #[error("{0}")]
    InvalidKey(#[from] mongodb::bson::oid::Error),

    /// Identifier collided with an existing item (unique index)
    #[error("{0}")]
    Duplicate(String),

    /// Any other driver failure
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

impl StoreError {
    /// True when the error is the unique-index collision on `id`
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}
