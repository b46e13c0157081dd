//! Rename workers
//!
//! Repository rename is a single service call. File rename has no native
//! operation on the per-file API, so it runs as a read / create / delete
//! sequence: if the delete of the old file fails after the new one was
//! created, both files exist and the worker reports that state with its
//! own refresh action so the UI can render it as an error needing manual
//! cleanup.

use gitpane_core::domain::remote_entry::{join_path, parent_of, leaf_name};
use gitpane_core::domain::task::Task;
use gitpane_core::events::{RefreshDirective, RemoteAction};
use tracing::{error, info, warn};

use crate::workers::WorkerCtx;

pub async fn run_rename_repository(
    ctx: WorkerCtx,
    mut task: Task,
    repo: String,
    new_name: String,
) {
    ctx.events
        .post(task.progress_event(format!("Renaming {} to {}...", repo, new_name), 50));

    match ctx.remote.rename_repository(&repo, &new_name).await {
        Ok(assigned) => {
            info!(task = %task.id, old = repo, new = assigned, "Renamed repository");
            ctx.events.post(task.final_event(
                format!("Renamed repository {} to {}", repo, assigned),
                Some(RefreshDirective::RepoList),
            ));
        }
        Err(err) => {
            warn!(task = %task.id, repo, %err, "Repository rename failed");
            ctx.events.post(task.final_event(
                format!("ERROR renaming repository {}: {}", repo, err),
                None,
            ));
        }
    }
}

/// Renames a file via the read / create / delete compensating sequence
pub async fn run_rename_file(
    ctx: WorkerCtx,
    mut task: Task,
    repo: String,
    old_path: String,
    new_name: String,
) {
    let dir = parent_of(&old_path);
    let old_name = leaf_name(&old_path);
    let new_path = join_path(&dir, &new_name);

    ctx.events
        .post(task.progress_event(format!("Reading {}...", old_path), 25));
    let content = match ctx.remote.read_file(&repo, &old_path).await {
        Ok(content) => content,
        Err(err) => {
            ctx.events.post(task.final_event(
                format!("ERROR renaming {}: {}", old_path, err),
                None,
            ));
            return;
        }
    };

    ctx.events
        .post(task.progress_event(format!("Creating {}...", new_path), 50));
    let create_message = format!(
        "{} {}",
        ctx.config.commit_messages.rename_create_prefix, new_name
    );
    if let Err(err) = ctx
        .remote
        .create_file(&repo, &new_path, &content.data, &create_message)
        .await
    {
        // nothing was changed; the old file is intact
        ctx.events.post(task.final_event(
            format!("ERROR renaming {}: {}", old_path, err),
            None,
        ));
        return;
    }
    ctx.events
        .post(task.progress_event(format!("Created {}", new_path), 75));

    ctx.events
        .post(task.progress_event(format!("Deleting {}...", old_path), 85));
    let delete_message = format!(
        "{} {}",
        ctx.config.commit_messages.rename_delete_prefix, old_name
    );
    match ctx
        .remote
        .delete_file(&repo, &old_path, &content.hash, &delete_message)
        .await
    {
        Ok(()) => {
            ctx.events
                .post(task.progress_event(format!("Deleted {}", old_path), 95));
            info!(task = %task.id, repo, old = old_path, new = new_path, "Renamed file");
            let refresh = RefreshDirective::RemoteDirectory {
                repo,
                path: dir,
                action: RemoteAction::RenameFile,
            };
            ctx.events.post(task.final_event(
                format!("Renamed {} to {}", old_path, new_name),
                Some(refresh),
            ));
        }
        Err(err) => {
            // the new file exists and the old one could not be removed
            error!(task = %task.id, repo, old = old_path, new = new_path, %err,
                "Rename left both files in place");
            let refresh = RefreshDirective::RemoteDirectory {
                repo,
                path: dir,
                action: RemoteAction::RenameFileManualCleanup,
            };
            ctx.events.post(task.final_event(
                format!(
                    "ERROR: rename created {} but failed to delete {}: {}. \
                     Both files exist; manual cleanup required",
                    new_path, old_path, err
                ),
                Some(refresh),
            ));
        }
    }
}
