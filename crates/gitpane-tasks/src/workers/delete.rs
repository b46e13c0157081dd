//! Delete workers for single items and whole repositories
//!
//! Repository deletion is irreversible, so the typed-confirmation prompt
//! runs on the UI thread before the task is ever submitted; by the time
//! this worker runs the decision is final.

use gitpane_core::domain::remote_entry::{parent_of, ContentHash};
use gitpane_core::domain::task::Task;
use gitpane_core::events::{RefreshDirective, RemoteAction};
use tracing::{info, warn};

use crate::workers::WorkerCtx;

/// Deletes one remote file, authorized by its content hash
pub async fn run_delete_item(
    ctx: WorkerCtx,
    mut task: Task,
    repo: String,
    path: String,
    hash: ContentHash,
) {
    ctx.events
        .post(task.progress_event(format!("Deleting {}...", path), 50));

    let message = &ctx.config.commit_messages.delete;
    match ctx.remote.delete_file(&repo, &path, &hash, message).await {
        Ok(()) => {
            info!(task = %task.id, repo, path, "Deleted remote file");
            let refresh = RefreshDirective::RemoteDirectory {
                repo,
                path: parent_of(&path),
                action: RemoteAction::DeleteItem,
            };
            ctx.events
                .post(task.final_event(format!("Deleted {}", path), Some(refresh)));
        }
        Err(err) => {
            warn!(task = %task.id, repo, path, %err, "Delete failed");
            ctx.events
                .post(task.final_event(format!("ERROR deleting {}: {}", path, err), None));
        }
    }
}

/// Deletes a whole repository
pub async fn run_delete_repository(ctx: WorkerCtx, mut task: Task, repo: String) {
    ctx.events
        .post(task.progress_event(format!("Deleting repository {}...", repo), 50));

    match ctx.remote.delete_repository(&repo).await {
        Ok(()) => {
            info!(task = %task.id, repo, "Deleted repository");
            ctx.events.post(task.final_event(
                format!("Deleted repository {}", repo),
                Some(RefreshDirective::RepoList),
            ));
        }
        Err(err) if err.is_not_found() => {
            // already gone; report clearly but nothing needs re-rendering
            ctx.events.post(task.final_event(
                format!("ERROR: repository {} does not exist", repo),
                None,
            ));
        }
        Err(err) => {
            warn!(task = %task.id, repo, %err, "Repository delete failed");
            ctx.events.post(task.final_event(
                format!("ERROR deleting repository {}: {}", repo, err),
                None,
            ));
        }
    }
}
