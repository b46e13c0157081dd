//! Domain error types
//!
//! This module defines the classified error taxonomy shared by every
//! operation in the task core, plus validation errors for user-supplied
//! names. Classification determines the human-readable message but never
//! changes control flow, with two exceptions: not-found during an
//! existence pre-check means "does not exist" rather than failure, and a
//! version conflict on update/delete is surfaced with refresh-and-retry
//! guidance.

use thiserror::Error;

/// Classified error for remote and local operations
///
/// Remote adapters map HTTP failures into these variants; the local
/// filesystem adapter maps IO errors into `NotFound` or `LocalIo`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The path, file, or repository does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Forbidden, or the item/listing exceeds the service's size limits
    #[error("Permission denied or too large: {0}")]
    PermissionOrTooLarge(String),

    /// The service is throttling requests
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The supplied content hash is stale - the item changed remotely
    #[error("Version conflict: {0} (refresh and retry)")]
    VersionConflict(String),

    /// Local filesystem failure
    #[error("Local I/O error: {0}")]
    LocalIo(String),

    /// Anything else
    #[error("{0}")]
    Generic(String),
}

impl OperationError {
    /// Returns true for the not-found variant
    ///
    /// Used by existence pre-checks, where not-found is an answer and
    /// not an error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OperationError::NotFound(_))
    }

    /// Returns true for the stale-hash variant
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, OperationError::VersionConflict(_))
    }

    /// Returns true for the rate-limited variant
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, OperationError::RateLimited(_))
    }
}

impl From<std::io::Error> for OperationError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            OperationError::NotFound(err.to_string())
        } else {
            OperationError::LocalIo(err.to_string())
        }
    }
}

/// Validation failures for user-supplied names and submissions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Repository names allow ASCII alphanumerics plus `-`, `_`, `.`
    #[error("Invalid repository name: {0}")]
    InvalidRepositoryName(String),

    /// File names must be non-empty and must not contain `/`
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Delete/update submitted without the content hash captured at read time
    #[error("Missing content hash for {0}")]
    MissingContentHash(String),
}
