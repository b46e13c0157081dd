//! Conflict prompt port
//!
//! The resolver asks the user exactly one question per batch, however
//! many roots conflict. The prompt runs on the UI thread before any
//! worker is spawned, so this trait is synchronous.

use crate::domain::transfer::BatchResolution;

/// Asks the user what to do about conflicting destinations
pub trait IConflictPrompt: Send + Sync {
    /// `conflicts` holds the display names of the conflicting roots
    fn decide(&self, destination: &str, conflicts: &[String]) -> BatchResolution;
}
