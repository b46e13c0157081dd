//! Background task execution
//!
//! The [`runner::TaskRunner`] spawns one tokio task per user-visible
//! operation (upload, download, delete, rename, fetch-info). Workers own
//! their inputs, never touch UI state, and report exclusively through the
//! event queue from `gitpane-core`. The [`dispatcher`] drains that queue
//! on the UI side, renders log lines and the status bar, and decides which
//! pane needs a refresh.

pub mod dispatcher;
pub mod filesystem;
pub mod progress;
pub mod runner;
pub mod workers;

pub use dispatcher::{IStatusView, UiDispatcher, ViewState};
pub use filesystem::TokioFileSystem;
pub use runner::TaskRunner;
