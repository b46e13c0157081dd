//! Local filesystem port

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::OperationError;

/// One entry from a local directory listing
#[derive(Debug, Clone)]
pub struct LocalEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Shape of a local path, for pre-checks and the info panel
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStat {
    pub exists: bool,
    pub is_file: bool,
    pub is_dir: bool,
    pub size: u64,
}

/// Operations against the local disk
#[async_trait]
pub trait ILocalFileSystem: Send + Sync {
    /// Entries directly under a directory, unreadable entries skipped
    async fn list_directory(&self, path: &Path) -> Result<Vec<LocalEntry>, OperationError>;

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, OperationError>;

    /// Writes bytes, creating parent directories as needed
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), OperationError>;

    async fn create_dir_all(&self, path: &Path) -> Result<(), OperationError>;

    async fn remove_file(&self, path: &Path) -> Result<(), OperationError>;

    async fn remove_dir_all(&self, path: &Path) -> Result<(), OperationError>;

    async fn exists(&self, path: &Path) -> bool;

    async fn stat(&self, path: &Path) -> Result<LocalStat, OperationError>;
}
