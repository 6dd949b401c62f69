//! Store error types.

use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver-level failure: connection, query, write, or a document that
    /// would not decode while draining a cursor.
    #[error("document store error: {0}")]
    Driver(#[from] mongodb::error::Error),
}
