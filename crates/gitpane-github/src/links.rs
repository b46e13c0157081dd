//! Web URL builders for the "open in browser" actions

/// Repository home page
pub fn repo_url(owner: &str, repo: &str) -> String {
    format!("https://github.com/{}/{}", owner, repo)
}

/// Directory view on a branch
pub fn dir_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        repo_url(owner, repo)
    } else {
        format!("https://github.com/{}/{}/tree/{}/{}", owner, repo, branch, trimmed)
    }
}

/// File view on a branch
pub fn file_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
    format!(
        "https://github.com/{}/{}/blob/{}/{}",
        owner,
        repo,
        branch,
        path.trim_matches('/')
    )
}
