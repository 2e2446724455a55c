//! Domain error type shared by every validating operation in the crate.
//!
//! The lifecycle evaluator itself never fails; only the operations that
//! accept user intent (status changes, admin actions, feedback, role tokens)
//! return [`CoreError`].

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The input was malformed or outside the accepted vocabulary.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The input conflicts with existing state (e.g. duplicate feedback).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The acting role may not perform the requested change.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Convenience alias for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;
