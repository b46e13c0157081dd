//! Conflict resolution errors

use gitpane_core::domain::errors::OperationError;
use thiserror::Error;

/// Failures during batch preparation
///
/// A pre-check failure aborts the whole batch before any worker is
/// spawned; nothing has been transferred when one of these surfaces.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// A destination existence check failed with a real error
    /// (not-found is an answer, not a failure)
    #[error("Could not check destination {path}: {source}")]
    PrecheckFailed {
        path: String,
        source: OperationError,
    },

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}
