//! Repository-level operations: listing, metadata, delete, rename

use gitpane_core::ports::remote_repository::IRemoteRepository;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn repo_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "test repo",
        "language": "Rust",
        "default_branch": "main",
        "private": false,
        "stargazers_count": 3,
        "forks_count": 1,
        "html_url": format!("https://github.com/octo/{}", name),
        "clone_url": format!("https://github.com/octo/{}.git", name),
        "ssh_url": format!("git@github.com:octo/{}.git", name),
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2026-02-01T12:00:00Z"
    })
}

#[tokio::test]
async fn list_repositories_follows_pagination() {
    let (server, provider) = common::setup().await;

    // a full first page forces a second request
    let page1: Vec<serde_json::Value> =
        (0..100).map(|i| repo_json(&format!("repo-{}", i))).collect();
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([repo_json("last")])),
        )
        .mount(&server)
        .await;

    let repos = provider.list_repositories().await.unwrap();
    assert_eq!(repos.len(), 101);
    assert_eq!(repos[100].name, "last");
    assert_eq!(repos[0].default_branch, "main");
}

#[tokio::test]
async fn get_repository_metadata_maps_fields() {
    let (server, provider) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("notes")))
        .mount(&server)
        .await;

    let info = provider.get_repository_metadata("notes").await.unwrap();
    assert_eq!(info.name, "notes");
    assert_eq!(info.stars, 3);
    assert_eq!(info.language.as_deref(), Some("Rust"));
    assert!(!info.private);
    assert!(info.created_at.is_some());
}

#[tokio::test]
async fn delete_repository_missing_is_not_found() {
    let (server, provider) = common::setup().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/octo/notes"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    common::mount_error(&server, "DELETE", "/repos/octo/gone", 404, "Not Found").await;

    provider.delete_repository("notes").await.unwrap();
    let err = provider.delete_repository("gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn rename_repository_returns_service_assigned_name() {
    let (server, provider) = common::setup().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/notes"))
        .and(body_partial_json(serde_json::json!({ "name": "notes-v2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("notes-v2")))
        .expect(1)
        .mount(&server)
        .await;

    let new_name = provider.rename_repository("notes", "notes-v2").await.unwrap();
    assert_eq!(new_name, "notes-v2");
}
