//! Application configuration
//!
//! A small JSON config covering the queue poll cadence, info panel limits
//! and commit message wording. All fields have defaults so a missing file
//! is not an error for first runs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Commit messages recorded by write operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitMessages {
    /// Prefixed to the repo-relative path, e.g. "Upload docs/a.txt"
    pub upload_prefix: String,
    pub delete: String,
    /// First half of a file rename, e.g. "Rename: create b.txt"
    pub rename_create_prefix: String,
    /// Second half of a file rename, e.g. "Rename: delete a.txt"
    pub rename_delete_prefix: String,
}

impl Default for CommitMessages {
    fn default() -> Self {
        Self {
            upload_prefix: "Upload".to_string(),
            delete: "Delete item via app".to_string(),
            rename_create_prefix: "Rename: create".to_string(),
            rename_delete_prefix: "Rename: delete".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How often the UI drains the event queue
    pub queue_poll_interval_ms: u64,
    /// Files at or above this size skip line counting in the info panel
    pub info_line_count_limit_bytes: u64,
    pub commit_messages: CommitMessages,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_poll_interval_ms: 150,
            info_line_count_limit_bytes: 2 * 1024 * 1024,
            commit_messages: CommitMessages::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_poll_interval_ms == 0 {
            anyhow::bail!("queue_poll_interval_ms must be greater than zero");
        }
        Ok(())
    }
}
