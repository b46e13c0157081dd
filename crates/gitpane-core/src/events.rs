//! Worker-to-UI event queue
//!
//! The unbounded channel built by [`event_queue`] is the only path from
//! background workers back to the UI thread. Workers post immutable
//! [`TaskEvent`] values; the UI drains them on a timer and never blocks on
//! the channel. Refresh intent travels as a typed [`RefreshDirective`]
//! rather than a string-encoded key.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::domain::task::TaskId;

/// Why a remote directory refresh was requested
///
/// The UI treats most actions alike but renders the manual-cleanup case
/// as an error regardless of message wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    Upload,
    DeleteItem,
    RenameFile,
    /// A rename created the new file but failed to delete the old one;
    /// both files exist and the user must clean up by hand
    RenameFileManualCleanup,
}

/// A typed request to re-render part of the UI after a task completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshDirective {
    /// The repository list changed (repo deleted or renamed)
    RepoList,
    /// A directory inside a repository changed
    RemoteDirectory {
        repo: String,
        path: String,
        action: RemoteAction,
    },
    /// A local directory changed
    LocalDirectory { path: PathBuf },
}

/// One message from a worker to the UI
///
/// Events are immutable values; the sender keeps no reference to them
/// after posting.
#[derive(Debug, Clone)]
pub struct TaskEvent {
    /// None for ambient status lines not tied to a task
    pub task_id: Option<TaskId>,
    pub message: String,
    pub progress: Option<u8>,
    /// True exactly once per task, on its last event
    pub is_final: bool,
    pub refresh: Option<RefreshDirective>,
}

impl TaskEvent {
    /// Intermediate progress report
    pub fn progress(task_id: TaskId, message: impl Into<String>, percent: u8) -> Self {
        Self {
            task_id: Some(task_id),
            message: message.into(),
            progress: Some(percent),
            is_final: false,
            refresh: None,
        }
    }

    /// Terminal event for a task, at 100%
    pub fn finished(
        task_id: TaskId,
        message: impl Into<String>,
        refresh: Option<RefreshDirective>,
    ) -> Self {
        Self {
            task_id: Some(task_id),
            message: message.into(),
            progress: Some(100),
            is_final: true,
            refresh,
        }
    }

    /// Status line with no task attached
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            task_id: None,
            message: message.into(),
            progress: None,
            is_final: false,
            refresh: None,
        }
    }
}

/// Worker-side handle, cheap to clone into every spawned task
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::UnboundedSender<TaskEvent>);

impl EventSender {
    /// Posts an event; a closed receiver (UI shutting down) is ignored
    pub fn post(&self, event: TaskEvent) {
        let _ = self.0.send(event);
    }
}

/// UI-side receiving end
#[derive(Debug)]
pub struct EventQueue(mpsc::UnboundedReceiver<TaskEvent>);

impl EventQueue {
    /// Takes every event currently queued without waiting
    pub fn drain(&mut self) -> Vec<TaskEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.0.try_recv() {
            events.push(event);
        }
        events
    }

    /// Waits for the next event; None when all senders are gone
    pub async fn recv(&mut self) -> Option<TaskEvent> {
        self.0.recv().await
    }

    /// True once every sender has been dropped
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// Builds the single worker-to-UI channel
pub fn event_queue() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender(tx), EventQueue(rx))
}
