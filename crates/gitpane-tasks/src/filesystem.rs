//! Local filesystem adapter over `tokio::fs`

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gitpane_core::domain::errors::OperationError;
use gitpane_core::ports::local_filesystem::{ILocalFileSystem, LocalEntry, LocalStat};
use tracing::warn;

/// Production `ILocalFileSystem` implementation
#[derive(Debug, Default, Clone)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ILocalFileSystem for TokioFileSystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<LocalEntry>, OperationError> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();
        while let Some(dirent) = reader.next_entry().await? {
            // an entry that vanished or is unreadable is skipped, not fatal
            let metadata = match dirent.metadata().await {
                Ok(m) => m,
                Err(err) => {
                    warn!(path = %dirent.path().display(), %err, "Skipping unreadable entry");
                    continue;
                }
            };
            let modified = metadata
                .modified()
                .ok()
                .map(DateTime::<Utc>::from);
            entries.push(LocalEntry {
                path: dirent.path(),
                name: dirent.file_name().to_string_lossy().into_owned(),
                is_dir: metadata.is_dir(),
                size: metadata.len(),
                modified,
            });
        }
        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, OperationError> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), OperationError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), OperationError> {
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), OperationError> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), OperationError> {
        tokio::fs::remove_dir_all(path).await?;
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn stat(&self, path: &Path) -> Result<LocalStat, OperationError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(LocalStat {
                exists: true,
                is_file: metadata.is_file(),
                is_dir: metadata.is_dir(),
                size: metadata.len(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(LocalStat::default()),
            Err(err) => Err(err.into()),
        }
    }
}
