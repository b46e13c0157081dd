//! Remote entry value types
//!
//! A [`RemoteEntry`] is a structured descriptor for a file or directory
//! inside a repository. Entries are plain values keyed by their structured
//! fields - never by a string-encoded composite - so there is no delimiter
//! parsing anywhere in the core.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Whether a remote entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    /// A regular file
    File,
    /// A directory (implicit on the remote side; never created explicitly)
    Dir,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::File => write!(f, "file"),
            EntryType::Dir => write!(f, "dir"),
        }
    }
}

/// Version token for a remote file (ETag-like)
///
/// Required to authorize updates and deletes. A hash becomes stale the
/// instant the remote file is modified by any actor; the service rejects
/// stale hashes with a version-conflict error, and callers must be
/// prepared for that rather than assuming a previously fetched hash is
/// still valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    /// Wraps a non-empty hash string
    pub fn new(hash: impl Into<String>) -> Result<Self, DomainError> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(DomainError::MissingContentHash("empty hash".to_string()));
        }
        Ok(Self(hash))
    }

    /// Returns the raw hash string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file or directory inside a repository
///
/// `path` is slash-separated and relative to the repository root, with no
/// leading or trailing slash (the root itself is the empty string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Repository the entry belongs to
    pub repository: String,
    /// Normalized repo-relative path
    pub path: String,
    /// Final path component
    pub name: String,
    /// File or directory
    pub entry_type: EntryType,
    /// Version token, present for files read from the service
    pub content_hash: Option<ContentHash>,
    /// Size in bytes, files only
    pub size: Option<u64>,
}

impl RemoteEntry {
    /// Builds a file entry
    pub fn file(
        repository: impl Into<String>,
        path: impl Into<String>,
        content_hash: Option<ContentHash>,
        size: Option<u64>,
    ) -> Self {
        let path = normalize_path(path.into());
        let name = leaf_name(&path);
        Self {
            repository: repository.into(),
            path,
            name,
            entry_type: EntryType::File,
            content_hash,
            size,
        }
    }

    /// Builds a directory entry
    pub fn dir(repository: impl Into<String>, path: impl Into<String>) -> Self {
        let path = normalize_path(path.into());
        let name = leaf_name(&path);
        Self {
            repository: repository.into(),
            path,
            name,
            entry_type: EntryType::Dir,
            content_hash: None,
            size: None,
        }
    }

    /// Returns true if the entry is a file
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    /// Parent directory path ("" for entries at the repository root)
    pub fn parent_path(&self) -> String {
        parent_of(&self.path)
    }
}

/// Strips leading/trailing slashes from a repo-relative path
pub fn normalize_path(path: String) -> String {
    path.trim_matches('/').to_string()
}

/// Final component of a repo-relative path ("" stays "")
pub fn leaf_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or("").to_string()
}

/// Parent of a repo-relative path ("" for top-level entries)
pub fn parent_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Joins a directory path and a child name, keeping normalization
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_matches('/'), name)
    }
}
