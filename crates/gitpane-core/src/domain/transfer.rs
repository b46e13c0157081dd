//! Transfer batches and conflict resolution outcomes
//!
//! A paste turns into a batch of root items plus one batch-wide conflict
//! resolution. Only file roots are pre-checked for conflicts; directory
//! roots and everything discovered during recursive expansion are handled
//! per item by the worker.

use crate::domain::clipboard::LocalItem;
use crate::domain::remote_entry::{ContentHash, EntryType, RemoteEntry};

/// The user's single decision for a whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchResolution {
    /// Replace every conflicting destination
    OverwriteAll,
    /// Drop conflicting roots, transfer the rest
    SkipConflicts,
    /// Abandon the batch entirely
    Cancelled,
}

/// Result of a per-root destination existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    /// Destination does not exist; the worker may create without looking again
    Missing,
    /// Destination exists with this shape
    Exists {
        entry_type: EntryType,
        content_hash: Option<ContentHash>,
    },
}

/// A local root item selected for upload
#[derive(Debug, Clone)]
pub struct UploadRoot {
    pub item: LocalItem,
    /// None for directory roots, which are never pre-checked
    pub precheck: Option<Precheck>,
}

/// A remote root entry selected for download
#[derive(Debug, Clone)]
pub struct DownloadRoot {
    pub entry: RemoteEntry,
    pub precheck: Option<Precheck>,
}

/// Resolved upload batch handed to the worker
#[derive(Debug)]
pub struct UploadBatch {
    pub resolution: BatchResolution,
    pub roots: Vec<UploadRoot>,
}

/// Resolved download batch handed to the worker
#[derive(Debug)]
pub struct DownloadBatch {
    pub resolution: BatchResolution,
    pub roots: Vec<DownloadRoot>,
}

impl UploadBatch {
    /// True when there is work to do
    pub fn is_actionable(&self) -> bool {
        self.resolution != BatchResolution::Cancelled && !self.roots.is_empty()
    }

    /// True when conflicting destinations should be replaced
    pub fn overwrite(&self) -> bool {
        self.resolution == BatchResolution::OverwriteAll
    }
}

impl DownloadBatch {
    pub fn is_actionable(&self) -> bool {
        self.resolution != BatchResolution::Cancelled && !self.roots.is_empty()
    }

    pub fn overwrite(&self) -> bool {
        self.resolution == BatchResolution::OverwriteAll
    }
}
