//! UI-side event dispatch
//!
//! The dispatcher is the single consumer of the event queue. On each poll
//! tick it drains everything queued, renders log lines and the status
//! bar through [`IStatusView`], and turns refresh directives into pane
//! refresh requests - but only when the directive actually concerns the
//! directory the user is looking at.

use std::path::PathBuf;
use std::time::Duration;

use gitpane_core::events::{EventQueue, RefreshDirective, RemoteAction, TaskEvent};
use tracing::trace;

/// Status bar lines are clipped to this many characters
const STATUS_LINE_LIMIT: usize = 80;

/// Severity of a rendered log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Which pane the view layer should re-render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTarget {
    RepoList,
    RemoteDirectory { repo: String, path: String },
    LocalDirectory { path: PathBuf },
}

/// What the user is currently looking at
///
/// Kept up to date by the view layer as the user navigates; the
/// dispatcher only reads it to decide whether a refresh is visible.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub local_dir: Option<PathBuf>,
    pub remote: Option<RemoteViewContext>,
}

#[derive(Debug, Clone)]
pub struct RemoteViewContext {
    pub repo: String,
    /// Normalized repo-relative path of the open directory
    pub path: String,
}

/// Rendering surface implemented by the view layer
pub trait IStatusView: Send {
    fn append_log(&mut self, level: LogLevel, line: &str);
    fn set_status(&mut self, line: &str, progress: Option<u8>);
    fn request_refresh(&mut self, target: RefreshTarget);
}

/// Drains the event queue and drives an [`IStatusView`]
pub struct UiDispatcher {
    queue: EventQueue,
    pub view: ViewState,
    poll_interval: Duration,
}

impl UiDispatcher {
    pub fn new(queue: EventQueue, poll_interval_ms: u64) -> Self {
        Self {
            queue,
            view: ViewState::default(),
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }

    /// Processes everything currently queued; returns the event count
    pub fn drain_once(&mut self, sink: &mut dyn IStatusView) -> usize {
        let events = self.queue.drain();
        let count = events.len();
        for event in events {
            self.dispatch(sink, event);
        }
        count
    }

    /// Poll loop; returns when every worker-side sender is gone
    pub async fn run(mut self, sink: &mut dyn IStatusView) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            let drained = self.drain_once(sink);
            trace!(drained, "Queue tick");
            if drained == 0 && self.queue.is_closed() {
                return;
            }
        }
    }

    fn dispatch(&self, sink: &mut dyn IStatusView, event: TaskEvent) {
        let line = match event.task_id {
            Some(id) => format!("[task {}] {}", id, event.message),
            None => event.message.clone(),
        };
        sink.append_log(level_for(&event), &line);
        sink.set_status(&clip(&event.message), event.progress);

        if let Some(directive) = &event.refresh {
            if let Some(target) = self.visible_refresh(directive) {
                sink.request_refresh(target);
            }
        }
    }

    /// Maps a directive to a refresh target if it concerns the current view
    ///
    /// A remote directory refresh fires when the changed path is the open
    /// directory itself or a child of it (an item deleted inside a
    /// subdirectory still updates the listing that shows the subdirectory).
    fn visible_refresh(&self, directive: &RefreshDirective) -> Option<RefreshTarget> {
        match directive {
            RefreshDirective::RepoList => Some(RefreshTarget::RepoList),
            RefreshDirective::RemoteDirectory { repo, path, .. } => {
                let view = self.view.remote.as_ref()?;
                if view.repo != *repo {
                    return None;
                }
                let changed = path.trim_matches('/');
                let current = view.path.trim_matches('/');
                let parent = gitpane_core::domain::remote_entry::parent_of(changed);
                if changed == current || parent == current {
                    Some(RefreshTarget::RemoteDirectory {
                        repo: repo.clone(),
                        path: current.to_string(),
                    })
                } else {
                    None
                }
            }
            RefreshDirective::LocalDirectory { path } => {
                let current = self.view.local_dir.as_ref()?;
                if current == path {
                    Some(RefreshTarget::LocalDirectory { path: path.clone() })
                } else {
                    None
                }
            }
        }
    }
}

/// Infers log severity from the event
///
/// Workers keep message prefixes stable ("ERROR", "Skipped", "OK:") so
/// severity stays a display concern. The manual-cleanup rename outcome is
/// always an error no matter how the message reads.
fn level_for(event: &TaskEvent) -> LogLevel {
    if let Some(RefreshDirective::RemoteDirectory {
        action: RemoteAction::RenameFileManualCleanup,
        ..
    }) = event.refresh
    {
        return LogLevel::Error;
    }
    if event.message.contains("ERROR") {
        LogLevel::Error
    } else if event.message.starts_with("Skipped") {
        LogLevel::Warning
    } else if event.message.starts_with("OK:") || event.is_final {
        LogLevel::Success
    } else {
        LogLevel::Info
    }
}

fn clip(message: &str) -> String {
    if message.chars().count() <= STATUS_LINE_LIMIT {
        message.to_string()
    } else {
        let clipped: String = message.chars().take(STATUS_LINE_LIMIT - 3).collect();
        format!("{}...", clipped)
    }
}
