//! Batch conflict resolver
//!
//! Only file roots are pre-checked: directory roots merge into existing
//! destination directories, and conflicts on their children are handled
//! per item by the workers. Whatever the number of conflicting roots, the
//! user is asked exactly once per batch.

use std::path::Path;
use std::sync::Arc;

use gitpane_core::domain::clipboard::LocalItem;
use gitpane_core::domain::remote_entry::{join_path, RemoteEntry};
use gitpane_core::domain::transfer::{
    BatchResolution, DownloadBatch, DownloadRoot, Precheck, UploadBatch, UploadRoot,
};
use gitpane_core::ports::{IConflictPrompt, ILocalFileSystem, IRemoteRepository};
use tracing::debug;

use crate::error::ConflictError;

/// Pre-transfer conflict detection over the remote and local ports
pub struct ConflictResolver {
    remote: Arc<dyn IRemoteRepository>,
    local: Arc<dyn ILocalFileSystem>,
}

impl ConflictResolver {
    pub fn new(remote: Arc<dyn IRemoteRepository>, local: Arc<dyn ILocalFileSystem>) -> Self {
        Self { remote, local }
    }

    /// Prepares an upload batch against a remote destination directory
    ///
    /// An empty repository (root listing answers not-found) short-circuits
    /// the whole batch as conflict-free: every root is tagged `Missing`
    /// and no per-item checks are made.
    pub async fn prepare_upload(
        &self,
        repo: &str,
        target_dir: &str,
        roots: Vec<LocalItem>,
        prompt: &dyn IConflictPrompt,
    ) -> Result<UploadBatch, ConflictError> {
        if let Err(err) = self.remote.list_directory(repo, "").await {
            if err.is_not_found() {
                debug!(repo, "Repository is empty, skipping conflict pre-checks");
                let roots = roots
                    .into_iter()
                    .map(|item| UploadRoot {
                        item,
                        precheck: Some(Precheck::Missing),
                    })
                    .collect();
                return Ok(UploadBatch {
                    resolution: BatchResolution::OverwriteAll,
                    roots,
                });
            }
            // listing failures other than not-found are not fatal here;
            // the per-root metadata checks below will classify them
        }

        let mut tagged = Vec::with_capacity(roots.len());
        let mut conflicts = Vec::new();
        for item in roots {
            let is_file = self
                .local
                .stat(&item.path)
                .await
                .map(|s| s.is_file)
                .unwrap_or(false);
            let precheck = if is_file {
                let dest = join_path(target_dir, &item.name);
                match self.remote.get_path_metadata(repo, &dest).await {
                    Ok(entry) => {
                        conflicts.push(item.name.clone());
                        Some(Precheck::Exists {
                            entry_type: entry.entry_type,
                            content_hash: entry.content_hash,
                        })
                    }
                    Err(err) if err.is_not_found() => Some(Precheck::Missing),
                    Err(err) => {
                        return Err(ConflictError::PrecheckFailed {
                            path: dest,
                            source: err,
                        })
                    }
                }
            } else {
                None
            };
            tagged.push(UploadRoot { item, precheck });
        }

        let destination = format!("{}/{}", repo, target_dir.trim_matches('/'));
        let (resolution, roots) = resolve(tagged, conflicts, &destination, prompt, |root| {
            matches!(root.precheck, Some(Precheck::Exists { .. }))
        });
        Ok(UploadBatch { resolution, roots })
    }

    /// Prepares a download batch against a local destination directory
    pub async fn prepare_download(
        &self,
        target_dir: &Path,
        roots: Vec<RemoteEntry>,
        prompt: &dyn IConflictPrompt,
    ) -> Result<DownloadBatch, ConflictError> {
        let mut tagged = Vec::with_capacity(roots.len());
        let mut conflicts = Vec::new();
        for entry in roots {
            let precheck = if entry.is_file() {
                let dest = target_dir.join(&entry.name);
                if self.local.exists(&dest).await {
                    conflicts.push(entry.name.clone());
                    Some(Precheck::Exists {
                        entry_type: entry.entry_type,
                        content_hash: None,
                    })
                } else {
                    Some(Precheck::Missing)
                }
            } else {
                None
            };
            tagged.push(DownloadRoot { entry, precheck });
        }

        let destination = target_dir.display().to_string();
        let (resolution, roots) = resolve(tagged, conflicts, &destination, prompt, |root| {
            matches!(root.precheck, Some(Precheck::Exists { .. }))
        });
        Ok(DownloadBatch { resolution, roots })
    }
}

/// Applies the single batch decision to the tagged roots
///
/// Skip-conflicts drops the conflicting roots; if nothing is left the
/// batch degenerates to cancelled so no empty task gets spawned.
fn resolve<R>(
    tagged: Vec<R>,
    conflicts: Vec<String>,
    destination: &str,
    prompt: &dyn IConflictPrompt,
    is_conflicting: impl Fn(&R) -> bool,
) -> (BatchResolution, Vec<R>) {
    if conflicts.is_empty() {
        return (BatchResolution::OverwriteAll, tagged);
    }
    debug!(destination, count = conflicts.len(), "Destination conflicts found");
    match prompt.decide(destination, &conflicts) {
        BatchResolution::OverwriteAll => (BatchResolution::OverwriteAll, tagged),
        BatchResolution::SkipConflicts => {
            let kept: Vec<R> = tagged.into_iter().filter(|r| !is_conflicting(r)).collect();
            if kept.is_empty() {
                (BatchResolution::Cancelled, kept)
            } else {
                (BatchResolution::SkipConflicts, kept)
            }
        }
        BatchResolution::Cancelled => (BatchResolution::Cancelled, Vec::new()),
    }
}
