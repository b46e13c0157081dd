//! Recursive download worker
//!
//! Mirrors the upload worker's queue expansion on the remote side. When
//! overwriting, the old local file is removed before the new bytes are
//! written; if that removal fails the item is skipped with an error so a
//! half-replaced file never results.

use std::collections::VecDeque;
use std::path::PathBuf;

use gitpane_core::domain::errors::OperationError;
use gitpane_core::domain::remote_entry::RemoteEntry;
use gitpane_core::domain::task::{Task, TransferTotals};
use gitpane_core::domain::transfer::{DownloadBatch, Precheck};
use gitpane_core::events::RefreshDirective;
use tracing::{debug, info};

use crate::progress::ProgressTracker;
use crate::workers::WorkerCtx;

struct WorkItem {
    entry: RemoteEntry,
    /// Local directory this item lands in
    local_dir: PathBuf,
    precheck: Option<Precheck>,
}

pub async fn run(ctx: WorkerCtx, mut task: Task, target_dir: PathBuf, batch: DownloadBatch) {
    let overwrite = batch.overwrite();
    let mut queue: VecDeque<WorkItem> = batch
        .roots
        .into_iter()
        .map(|root| WorkItem {
            entry: root.entry,
            local_dir: target_dir.clone(),
            precheck: root.precheck,
        })
        .collect();

    let mut tracker = ProgressTracker::new(queue.len());
    let mut totals = TransferTotals::default();
    info!(task = %task.id, target = %target_dir.display(), roots = queue.len(), "Download started");

    while let Some(item) = queue.pop_front() {
        if !item.entry.is_file() {
            let subdir = item.local_dir.join(&item.entry.name);
            let listed = async {
                ctx.local.create_dir_all(&subdir).await?;
                ctx.remote
                    .list_directory(&item.entry.repository, &item.entry.path)
                    .await
            }
            .await;
            match listed {
                Ok(children) => {
                    tracker.discovered(children.len());
                    for child in children {
                        queue.push_back(WorkItem {
                            entry: child,
                            local_dir: subdir.clone(),
                            precheck: None,
                        });
                    }
                }
                Err(err) => {
                    totals.record_error(format!("ERROR listing {}: {}", item.entry.path, err));
                }
            }
            tracker.completed_one();
            ctx.events.post(task.progress_event(
                format!("Scanning {}...", item.entry.name),
                tracker.percent(),
            ));
            continue;
        }

        let dest = item.local_dir.join(&item.entry.name);
        let outcome = download_file(&ctx, &item, &dest, overwrite).await;
        tracker.completed_one();
        let message = match outcome {
            Outcome::Written => {
                totals.succeeded += 1;
                format!("OK: {}", item.entry.path)
            }
            Outcome::Skipped => {
                totals.skipped += 1;
                format!("Skipped (exists): {}", item.entry.path)
            }
            Outcome::Failed(err) => {
                let line = format!("ERROR downloading {}: {}", item.entry.path, err);
                totals.record_error(line.clone());
                line
            }
        };
        ctx.events.post(task.progress_event(message, tracker.percent()));
    }

    let summary = totals.summary("Download");
    info!(task = %task.id, %summary, "Download finished");
    let refresh = RefreshDirective::LocalDirectory { path: target_dir };
    ctx.events.post(task.final_event(summary, Some(refresh)));
}

enum Outcome {
    Written,
    Skipped,
    Failed(OperationError),
}

async fn download_file(
    ctx: &WorkerCtx,
    item: &WorkItem,
    dest: &std::path::Path,
    overwrite: bool,
) -> Outcome {
    let exists = match &item.precheck {
        Some(Precheck::Missing) => false,
        Some(Precheck::Exists { .. }) => true,
        None => ctx.local.exists(dest).await,
    };

    if exists {
        if !overwrite {
            return Outcome::Skipped;
        }
        // clear the old target first; a local directory can occupy the
        // remote file's name and has to go the same way. On failure skip
        // rather than risk writing into something we could not clear.
        let removal = match ctx.local.stat(dest).await {
            Ok(stat) if stat.is_dir => ctx.local.remove_dir_all(dest).await,
            Ok(_) => ctx.local.remove_file(dest).await,
            Err(err) => Err(err),
        };
        if let Err(err) = removal {
            return Outcome::Failed(OperationError::Generic(format!(
                "could not remove existing target: {}",
                err
            )));
        }
    }

    let content = match ctx
        .remote
        .read_file(&item.entry.repository, &item.entry.path)
        .await
    {
        Ok(content) => content,
        Err(err) => return Outcome::Failed(err),
    };
    match ctx.local.write_file(dest, &content.data).await {
        Ok(()) => {
            debug!(path = %dest.display(), bytes = content.data.len(), "Wrote file");
            Outcome::Written
        }
        Err(err) => Outcome::Failed(err),
    }
}
