//! Copy/paste clipboard for cross-pane transfers
//!
//! The clipboard holds one homogeneous selection at a time - either local
//! paths or remote entries, never a mix. It is deliberately not cleared
//! after a paste so the same selection can be pasted again.

use std::path::{Path, PathBuf};

use crate::domain::remote_entry::RemoteEntry;

/// A selected local file or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalItem {
    pub path: PathBuf,
    pub name: String,
}

impl LocalItem {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

/// Which pane a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOrigin {
    Local,
    Remote,
}

/// The current clipboard contents
#[derive(Debug, Clone)]
pub enum ClipboardSelection {
    Local(Vec<LocalItem>),
    Remote(Vec<RemoteEntry>),
}

impl ClipboardSelection {
    pub fn from_local_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        ClipboardSelection::Local(
            paths
                .into_iter()
                .map(|p| LocalItem::from_path(p.as_ref()))
                .collect(),
        )
    }

    pub fn origin(&self) -> ClipboardOrigin {
        match self {
            ClipboardSelection::Local(_) => ClipboardOrigin::Local,
            ClipboardSelection::Remote(_) => ClipboardOrigin::Remote,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ClipboardSelection::Local(items) => items.len(),
            ClipboardSelection::Remote(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Status line for the copy action, listing at most three names
    pub fn summary(&self) -> String {
        let names: Vec<&str> = match self {
            ClipboardSelection::Local(items) => items.iter().map(|i| i.name.as_str()).collect(),
            ClipboardSelection::Remote(entries) => {
                entries.iter().map(|e| e.name.as_str()).collect()
            }
        };
        let shown = names[..names.len().min(3)].join(", ");
        let suffix = if names.len() > 3 { "..." } else { "" };
        format!("Copied {} item(s): {}{}", names.len(), shown, suffix)
    }
}
