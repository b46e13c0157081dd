//! Recursive upload worker
//!
//! Expands directory roots breadth-first over an explicit work queue.
//! Items discovered during expansion were never pre-checked, so each
//! unchecked file gets one metadata call right before its write; roots
//! carry their pre-check tag from the resolver and skip that call. A
//! failing leaf records an error and the batch continues.

use std::collections::VecDeque;
use std::path::PathBuf;

use gitpane_core::domain::errors::OperationError;
use gitpane_core::domain::remote_entry::{join_path, EntryType};
use gitpane_core::domain::task::{Task, TransferTotals};
use gitpane_core::domain::transfer::{Precheck, UploadBatch};
use gitpane_core::events::{RefreshDirective, RemoteAction};
use tracing::{debug, info};

use crate::progress::ProgressTracker;
use crate::workers::WorkerCtx;

struct WorkItem {
    local_path: PathBuf,
    name: String,
    /// Remote directory this item lands in
    remote_dir: String,
    precheck: Option<Precheck>,
}

pub async fn run(ctx: WorkerCtx, mut task: Task, repo: String, target_dir: String, batch: UploadBatch) {
    let overwrite = batch.overwrite();
    let mut queue: VecDeque<WorkItem> = batch
        .roots
        .into_iter()
        .map(|root| WorkItem {
            local_path: root.item.path,
            name: root.item.name,
            remote_dir: target_dir.clone(),
            precheck: root.precheck,
        })
        .collect();

    let mut tracker = ProgressTracker::new(queue.len());
    let mut totals = TransferTotals::default();
    info!(task = %task.id, repo, target = target_dir, roots = queue.len(), "Upload started");

    while let Some(item) = queue.pop_front() {
        let is_dir = ctx
            .local
            .stat(&item.local_path)
            .await
            .map(|s| s.is_dir)
            .unwrap_or(false);

        if is_dir {
            let subdir = join_path(&item.remote_dir, &item.name);
            match ctx.local.list_directory(&item.local_path).await {
                Ok(children) => {
                    tracker.discovered(children.len());
                    for child in children {
                        queue.push_back(WorkItem {
                            local_path: child.path,
                            name: child.name,
                            remote_dir: subdir.clone(),
                            precheck: None,
                        });
                    }
                }
                Err(err) => {
                    totals.record_error(format!("ERROR listing {}: {}", item.name, err));
                }
            }
            tracker.completed_one();
            ctx.events.post(task.progress_event(
                format!("Scanning {}...", item.name),
                tracker.percent(),
            ));
            continue;
        }

        let dest = join_path(&item.remote_dir, &item.name);
        let outcome = upload_file(&ctx, &repo, &dest, &item, overwrite).await;
        tracker.completed_one();
        let message = match outcome {
            Outcome::Created | Outcome::Updated => {
                totals.succeeded += 1;
                format!("OK: {}", dest)
            }
            Outcome::Skipped => {
                totals.skipped += 1;
                format!("Skipped (exists): {}", dest)
            }
            Outcome::Failed(err) => {
                let line = format!("ERROR uploading {}: {}", dest, err);
                totals.record_error(line.clone());
                line
            }
        };
        ctx.events.post(task.progress_event(message, tracker.percent()));
    }

    let summary = totals.summary("Upload");
    info!(task = %task.id, %summary, "Upload finished");
    let refresh = RefreshDirective::RemoteDirectory {
        repo,
        path: target_dir,
        action: RemoteAction::Upload,
    };
    ctx.events.post(task.final_event(summary, Some(refresh)));
}

enum Outcome {
    Created,
    Updated,
    Skipped,
    Failed(OperationError),
}

async fn upload_file(
    ctx: &WorkerCtx,
    repo: &str,
    dest: &str,
    item: &WorkItem,
    overwrite: bool,
) -> Outcome {
    let data = match ctx.local.read_file(&item.local_path).await {
        Ok(data) => data,
        Err(err) => return Outcome::Failed(err),
    };
    let message = format!("{} {}", ctx.config.commit_messages.upload_prefix, dest);

    // roots arrive pre-checked; discovered children need one lookup here
    let existing = match &item.precheck {
        Some(tag) => tag.clone(),
        None => match ctx.remote.get_path_metadata(repo, dest).await {
            Ok(entry) => Precheck::Exists {
                entry_type: entry.entry_type,
                content_hash: entry.content_hash,
            },
            Err(err) if err.is_not_found() => Precheck::Missing,
            Err(err) => return Outcome::Failed(err),
        },
    };

    match existing {
        Precheck::Missing => match ctx.remote.create_file(repo, dest, &data, &message).await {
            Ok(()) => {
                debug!(repo, dest, "Created");
                Outcome::Created
            }
            Err(err) => Outcome::Failed(err),
        },
        Precheck::Exists {
            entry_type: EntryType::Dir,
            ..
        } => Outcome::Failed(OperationError::Generic(format!(
            "{} exists as a directory",
            dest
        ))),
        Precheck::Exists {
            content_hash: Some(hash),
            ..
        } if overwrite => {
            match ctx
                .remote
                .update_file(repo, dest, &data, &hash, &message)
                .await
            {
                Ok(()) => {
                    debug!(repo, dest, "Updated");
                    Outcome::Updated
                }
                Err(err) => Outcome::Failed(err),
            }
        }
        Precheck::Exists {
            content_hash: None, ..
        } if overwrite => Outcome::Failed(OperationError::Generic(format!(
            "Cannot overwrite {}: missing content hash",
            dest
        ))),
        Precheck::Exists { .. } => Outcome::Skipped,
    }
}
