//! Info panel worker
//!
//! Gathers a human-readable report for a repository, file, or directory.
//! The report travels back over a oneshot channel so the caller can show
//! a dialog, while the usual final event closes out the task in the log.

use gitpane_core::domain::remote_entry::RemoteEntry;
use gitpane_core::domain::task::Task;
use tokio::sync::oneshot;
use tracing::debug;

use crate::workers::WorkerCtx;

/// What the user asked about
#[derive(Debug, Clone)]
pub enum InfoSubject {
    Repository(String),
    Entry(RemoteEntry),
}

/// Rendered report, one detail line per row
#[derive(Debug, Clone)]
pub struct InfoReport {
    pub title: String,
    pub details: Vec<String>,
}

/// How many entries of a directory the report lists
const DIR_LISTING_LIMIT: usize = 20;

pub async fn run(
    ctx: WorkerCtx,
    mut task: Task,
    subject: InfoSubject,
    report_tx: oneshot::Sender<InfoReport>,
) {
    ctx.events
        .post(task.progress_event("Fetching info...", 50));

    let result = match subject {
        InfoSubject::Repository(repo) => repository_report(&ctx, &repo).await,
        InfoSubject::Entry(entry) => {
            if entry.is_file() {
                file_report(&ctx, &entry).await
            } else {
                directory_report(&ctx, &entry).await
            }
        }
    };

    match result {
        Ok(report) => {
            debug!(task = %task.id, title = report.title, "Info gathered");
            ctx.events
                .post(task.final_event(format!("Info: {}", report.title), None));
            let _ = report_tx.send(report);
        }
        Err(err) => {
            ctx.events
                .post(task.final_event(format!("ERROR fetching info: {}", err), None));
        }
    }
}

async fn repository_report(
    ctx: &WorkerCtx,
    repo: &str,
) -> Result<InfoReport, gitpane_core::domain::errors::OperationError> {
    let info = ctx.remote.get_repository_metadata(repo).await?;
    let mut details = vec![
        format!("Name: {}", info.name),
        format!(
            "Description: {}",
            info.description.as_deref().unwrap_or("(none)")
        ),
        format!("Language: {}", info.language.as_deref().unwrap_or("(none)")),
        format!("Default branch: {}", info.default_branch),
        format!("Visibility: {}", if info.private { "private" } else { "public" }),
        format!("Stars: {}  Forks: {}", info.stars, info.forks),
        format!("Web: {}", info.html_url),
        format!("Clone (HTTPS): {}", info.clone_url),
        format!("Clone (SSH): {}", info.ssh_url),
    ];
    if let Some(created) = info.created_at {
        details.push(format!("Created: {}", created.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(updated) = info.updated_at {
        details.push(format!("Updated: {}", updated.format("%Y-%m-%d %H:%M UTC")));
    }
    Ok(InfoReport {
        title: format!("Repository {}", info.name),
        details,
    })
}

async fn file_report(
    ctx: &WorkerCtx,
    entry: &RemoteEntry,
) -> Result<InfoReport, gitpane_core::domain::errors::OperationError> {
    let size = entry.size.unwrap_or(0);
    let mut details = vec![
        format!("Path: {}/{}", entry.repository, entry.path),
        format!("Size: {}", format_size(size)),
    ];
    if let Some(hash) = &entry.content_hash {
        details.push(format!("Hash: {}", hash));
    }

    // counting lines means downloading the file, so big ones are skipped
    if size < ctx.config.info_line_count_limit_bytes {
        match ctx.remote.read_file(&entry.repository, &entry.path).await {
            Ok(content) => {
                let lines = content.data.iter().filter(|&&b| b == b'\n').count();
                details.push(format!("Lines: {}", lines));
            }
            Err(err) => {
                details.push(format!("Lines: unavailable ({})", err));
            }
        }
    } else {
        details.push("Lines: not counted (file too large)".to_string());
    }
    Ok(InfoReport {
        title: format!("File {}", entry.name),
        details,
    })
}

async fn directory_report(
    ctx: &WorkerCtx,
    entry: &RemoteEntry,
) -> Result<InfoReport, gitpane_core::domain::errors::OperationError> {
    let children = ctx
        .remote
        .list_directory(&entry.repository, &entry.path)
        .await?;
    let files = children.iter().filter(|c| c.is_file()).count();
    let level_size: u64 = children.iter().filter_map(|c| c.size).sum();
    let mut details = vec![
        format!("Path: {}/{}", entry.repository, entry.path),
        format!(
            "Entries: {} ({} files, {} dirs)",
            children.len(),
            files,
            children.len() - files
        ),
        format!("Size (this level): {}", format_size(level_size)),
    ];
    for child in children.iter().take(DIR_LISTING_LIMIT) {
        details.push(format!("  {} ({})", child.name, child.entry_type));
    }
    if children.len() > DIR_LISTING_LIMIT {
        details.push(format!("  ... and {} more", children.len() - DIR_LISTING_LIMIT));
    }
    Ok(InfoReport {
        title: format!("Directory {}", entry.name),
        details,
    })
}

/// Formats a byte count with one decimal above the byte range
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.1} GB", b / GB)
    }
}
