//! Remote repository port
//!
//! Abstraction over the hosting service's per-file contents API. There is
//! no transactional or multi-file commit support: every write is a single
//! file-level call, and compound operations (rename, recursive delete)
//! are sequences of these calls with partial-failure reporting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::OperationError;
use crate::domain::remote_entry::{ContentHash, RemoteEntry};

/// Repository-level metadata for the info panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub default_branch: String,
    pub private: bool,
    pub stars: u64,
    pub forks: u64,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Bytes plus the version token captured at read time
#[derive(Debug, Clone)]
pub struct FileContent {
    pub data: Vec<u8>,
    pub hash: ContentHash,
}

/// Operations against the remote hosting service
///
/// All calls classify failures into [`OperationError`]. Between a version
/// check and the write that uses it another actor may modify the same
/// path; that window is accepted, and the service's stale-hash rejection
/// (surfaced as `VersionConflict`) is the safety net.
#[async_trait]
pub trait IRemoteRepository: Send + Sync {
    /// All repositories owned by the authenticated account
    async fn list_repositories(&self) -> Result<Vec<RepositoryInfo>, OperationError>;

    /// Entries directly under a directory ("" for the repository root)
    ///
    /// Listing the root of an empty repository returns `NotFound`.
    async fn list_directory(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RemoteEntry>, OperationError>;

    /// Full file contents plus the current version token
    async fn read_file(&self, repo: &str, path: &str) -> Result<FileContent, OperationError>;

    /// Creates a file that must not already exist
    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        message: &str,
    ) -> Result<(), OperationError>;

    /// Replaces a file, authorized by the hash captured at read time
    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        expected_hash: &ContentHash,
        message: &str,
    ) -> Result<(), OperationError>;

    /// Deletes a file, authorized by the hash captured at read time
    async fn delete_file(
        &self,
        repo: &str,
        path: &str,
        expected_hash: &ContentHash,
        message: &str,
    ) -> Result<(), OperationError>;

    /// Deletes a whole repository
    async fn delete_repository(&self, repo: &str) -> Result<(), OperationError>;

    /// Renames a repository, returning the service-assigned new name
    async fn rename_repository(
        &self,
        repo: &str,
        new_name: &str,
    ) -> Result<String, OperationError>;

    /// Repository metadata for the info panel
    async fn get_repository_metadata(&self, repo: &str)
        -> Result<RepositoryInfo, OperationError>;

    /// Metadata for one path; `NotFound` means the path does not exist
    async fn get_path_metadata(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<RemoteEntry, OperationError>;
}
