//! Shared test helpers for GitHub API integration tests
//!
//! Each helper mounts mock endpoints on a wiremock server and returns an
//! adapter pointing at it, authenticated as user "octo".

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitpane_github::client::GithubClient;
use gitpane_github::provider::GithubRepositoryClient;

pub const OWNER: &str = "octo";

/// Starts a mock server and returns it with an adapter pointed at it
pub async fn setup() -> (MockServer, GithubRepositoryClient) {
    let server = MockServer::start().await;
    let client = GithubClient::with_base_url("test-token", server.uri());
    let provider = GithubRepositoryClient::new(client, OWNER);
    (server, provider)
}

/// JSON for one file item in a contents response
pub fn file_item(repo_path: &str, sha: &str, size: u64) -> serde_json::Value {
    let name = repo_path.rsplit('/').next().unwrap();
    serde_json::json!({
        "name": name,
        "path": repo_path,
        "sha": sha,
        "size": size,
        "type": "file"
    })
}

/// JSON for one directory item in a contents response
pub fn dir_item(repo_path: &str) -> serde_json::Value {
    let name = repo_path.rsplit('/').next().unwrap();
    serde_json::json!({
        "name": name,
        "path": repo_path,
        "sha": "tree-sha",
        "size": 0,
        "type": "dir"
    })
}

/// Mounts a contents GET for a file with inline base64 content
pub async fn mount_file_contents(
    server: &MockServer,
    repo: &str,
    repo_path: &str,
    sha: &str,
    data: &[u8],
) {
    let url = format!("/repos/{}/{}/contents/{}", OWNER, repo, repo_path);
    let name = repo_path.rsplit('/').next().unwrap();
    Mock::given(method("GET"))
        .and(path(&url))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": name,
            "path": repo_path,
            "sha": sha,
            "size": data.len(),
            "type": "file",
            "content": BASE64.encode(data),
            "encoding": "base64"
        })))
        .mount(server)
        .await;
}

/// Mounts a contents GET for a directory listing
pub async fn mount_dir_listing(
    server: &MockServer,
    repo: &str,
    repo_path: &str,
    items: serde_json::Value,
) {
    let url = if repo_path.is_empty() {
        format!("/repos/{}/{}/contents/", OWNER, repo)
    } else {
        format!("/repos/{}/{}/contents/{}", OWNER, repo, repo_path)
    };
    Mock::given(method("GET"))
        .and(path(&url))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Mounts a GitHub-style error response for any matching request
pub async fn mount_error(
    server: &MockServer,
    http_method: &str,
    url: &str,
    status: u16,
    message: &str,
) {
    Mock::given(method(http_method))
        .and(path(url))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(serde_json::json!({ "message": message })),
        )
        .mount(server)
        .await;
}
