//! Task identity and progress accounting
//!
//! Every background operation is a [`Task`] with a unique id. Workers own
//! their task for its whole lifetime and report through queue events only;
//! progress is monotonic per task and capped below completion until the
//! worker posts its final event.

use crate::events::{RefreshDirective, TaskEvent};

/// Cap applied to all intermediate progress reports
///
/// The remaining headroom is released only by the final event, so a task
/// whose estimated total keeps growing during directory expansion can
/// never appear finished early.
pub const PROGRESS_CAP: u8 = 95;

/// Unique identifier for a background task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of operation a task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Upload,
    Download,
    DeleteItem,
    DeleteRepo,
    RenameRepo,
    RenameFile,
    FetchInfo,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TaskKind::Upload => "upload",
            TaskKind::Download => "download",
            TaskKind::DeleteItem => "delete item",
            TaskKind::DeleteRepo => "delete repository",
            TaskKind::RenameRepo => "rename repository",
            TaskKind::RenameFile => "rename file",
            TaskKind::FetchInfo => "fetch info",
        };
        write!(f, "{}", label)
    }
}

/// A running background operation
///
/// Owned by exactly one worker. The task remembers the highest progress
/// value it has reported so later reports with a smaller estimate (the
/// total grew mid-task) never move the bar backwards.
#[derive(Debug)]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    progress: u8,
}

impl Task {
    pub fn new(id: TaskId, kind: TaskKind) -> Self {
        Self {
            id,
            kind,
            progress: 0,
        }
    }

    /// Highest progress reported so far
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Builds a progress event, clamping to monotonic and capping at
    /// [`PROGRESS_CAP`]
    pub fn progress_event(&mut self, message: impl Into<String>, percent: u8) -> TaskEvent {
        let capped = percent.min(PROGRESS_CAP);
        self.progress = self.progress.max(capped);
        TaskEvent::progress(self.id, message, self.progress)
    }

    /// Builds the task's single final event at 100%
    pub fn final_event(
        &mut self,
        message: impl Into<String>,
        refresh: Option<RefreshDirective>,
    ) -> TaskEvent {
        self.progress = 100;
        TaskEvent::finished(self.id, message, refresh)
    }
}

/// Per-batch outcome counters for upload and download workers
#[derive(Debug, Default)]
pub struct TransferTotals {
    pub succeeded: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

impl TransferTotals {
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// One-line batch summary, e.g. "Upload complete: 3 succeeded, 1 skipped"
    ///
    /// Zero counts are omitted so a clean run reads as plain success and
    /// the word "error" appears only when something actually failed.
    pub fn summary(&self, verb: &str) -> String {
        let mut line = format!("{} complete: {} succeeded", verb, self.succeeded);
        if self.skipped > 0 {
            line.push_str(&format!(", {} skipped", self.skipped));
        }
        if !self.errors.is_empty() {
            line.push_str(&format!(", {} errors", self.errors.len()));
        }
        line
    }
}
