//! Task runner
//!
//! Allocates task ids, posts the initial queued event, and spawns one
//! tokio task per operation. Submission never blocks: everything the
//! worker needs moves into the spawn, and the submitting thread goes
//! straight back to the UI loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gitpane_core::config::Config;
use gitpane_core::domain::errors::DomainError;
use gitpane_core::domain::remote_entry::ContentHash;
use gitpane_core::domain::task::{Task, TaskId, TaskKind};
use gitpane_core::domain::transfer::{DownloadBatch, UploadBatch};
use gitpane_core::domain::validate::{validate_file_name, validate_repository_name};
use gitpane_core::events::{EventSender, TaskEvent};
use gitpane_core::ports::{ILocalFileSystem, IRemoteRepository};
use tokio::sync::oneshot;
use tracing::debug;

use crate::workers::info::{InfoReport, InfoSubject};
use crate::workers::{self, WorkerCtx};

/// Spawns background workers and hands out task ids
pub struct TaskRunner {
    ctx: WorkerCtx,
    next_task_id: AtomicU64,
}

impl TaskRunner {
    pub fn new(
        remote: Arc<dyn IRemoteRepository>,
        local: Arc<dyn ILocalFileSystem>,
        events: EventSender,
        config: Arc<Config>,
    ) -> Self {
        Self {
            ctx: WorkerCtx {
                remote,
                local,
                events,
                config,
            },
            next_task_id: AtomicU64::new(1),
        }
    }

    fn begin(&self, kind: TaskKind, message: String) -> Task {
        let id = TaskId(self.next_task_id.fetch_add(1, Ordering::Relaxed));
        debug!(task = %id, %kind, "Task queued");
        let mut task = Task::new(id, kind);
        self.ctx.events.post(task.progress_event(message, 0));
        task
    }

    /// Spawns an upload of a resolved batch into `repo` under `target_dir`
    ///
    /// A cancelled or empty batch spawns nothing and reports as a plain
    /// status line.
    pub fn submit_upload(
        &self,
        repo: impl Into<String>,
        target_dir: impl Into<String>,
        batch: UploadBatch,
    ) -> Option<TaskId> {
        let repo = repo.into();
        let target_dir = target_dir.into();
        if !batch.is_actionable() {
            self.ctx.events.post(TaskEvent::status("Upload cancelled"));
            return None;
        }
        let task = self.begin(
            TaskKind::Upload,
            format!("Uploading {} item(s) to {}...", batch.roots.len(), repo),
        );
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::upload::run(ctx, task, repo, target_dir, batch));
        Some(id)
    }

    /// Spawns a download of a resolved batch into a local directory
    pub fn submit_download(&self, target_dir: PathBuf, batch: DownloadBatch) -> Option<TaskId> {
        if !batch.is_actionable() {
            self.ctx
                .events
                .post(TaskEvent::status("Download cancelled"));
            return None;
        }
        let task = self.begin(
            TaskKind::Download,
            format!("Downloading {} item(s)...", batch.roots.len()),
        );
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::download::run(ctx, task, target_dir, batch));
        Some(id)
    }

    /// Spawns deletion of one remote file
    ///
    /// Multi-item deletes are one task per item; a failing item never
    /// blocks the others.
    pub fn submit_delete_item(
        &self,
        repo: impl Into<String>,
        path: impl Into<String>,
        hash: ContentHash,
    ) -> TaskId {
        let repo = repo.into();
        let path = path.into();
        let task = self.begin(TaskKind::DeleteItem, format!("Deleting {}...", path));
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::delete::run_delete_item(ctx, task, repo, path, hash));
        id
    }

    /// Spawns deletion of a whole repository
    ///
    /// Callers must have taken the typed repository-name confirmation on
    /// the UI thread before submitting; there is no further guard here.
    pub fn submit_delete_repository(&self, repo: impl Into<String>) -> TaskId {
        let repo = repo.into();
        let task = self.begin(
            TaskKind::DeleteRepo,
            format!("Deleting repository {}...", repo),
        );
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::delete::run_delete_repository(ctx, task, repo));
        id
    }

    /// Validates and spawns a repository rename
    pub fn submit_rename_repository(
        &self,
        repo: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Result<TaskId, DomainError> {
        let repo = repo.into();
        let new_name = new_name.into();
        validate_repository_name(&new_name)?;
        let task = self.begin(
            TaskKind::RenameRepo,
            format!("Renaming {} to {}...", repo, new_name),
        );
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::rename::run_rename_repository(
            ctx, task, repo, new_name,
        ));
        Ok(id)
    }

    /// Validates and spawns a file rename (read / create / delete)
    pub fn submit_rename_file(
        &self,
        repo: impl Into<String>,
        old_path: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Result<TaskId, DomainError> {
        let repo = repo.into();
        let old_path = old_path.into();
        let new_name = new_name.into();
        validate_file_name(&new_name)?;
        let task = self.begin(
            TaskKind::RenameFile,
            format!("Renaming {}...", old_path),
        );
        let id = task.id;
        let ctx = self.ctx.clone();
        tokio::spawn(workers::rename::run_rename_file(
            ctx, task, repo, old_path, new_name,
        ));
        Ok(id)
    }

    /// Spawns an info fetch; the report arrives on the returned channel
    pub fn submit_fetch_info(
        &self,
        subject: InfoSubject,
    ) -> (TaskId, oneshot::Receiver<InfoReport>) {
        let task = self.begin(TaskKind::FetchInfo, "Fetching info...".to_string());
        let id = task.id;
        let (report_tx, report_rx) = oneshot::channel();
        let ctx = self.ctx.clone();
        tokio::spawn(workers::info::run(ctx, task, subject, report_tx));
        (id, report_rx)
    }
}
