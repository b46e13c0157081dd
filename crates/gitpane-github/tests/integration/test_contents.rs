//! Contents endpoint tests: listing, reading, writing, classification

use gitpane_core::domain::errors::OperationError;
use gitpane_core::domain::remote_entry::ContentHash;
use gitpane_core::ports::remote_repository::IRemoteRepository;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn list_directory_returns_typed_entries() {
    let (server, provider) = common::setup().await;
    common::mount_dir_listing(
        &server,
        "notes",
        "docs",
        serde_json::json!([
            common::file_item("docs/a.txt", "sha-a", 11),
            common::dir_item("docs/sub"),
        ]),
    )
    .await;

    let entries = provider.list_directory("notes", "docs").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_file());
    assert_eq!(entries[0].path, "docs/a.txt");
    assert_eq!(entries[0].content_hash.as_ref().unwrap().as_str(), "sha-a");
    assert!(!entries[1].is_file());
    assert!(entries[1].content_hash.is_none());
}

#[tokio::test]
async fn empty_repository_root_is_not_found() {
    let (server, provider) = common::setup().await;
    common::mount_error(
        &server,
        "GET",
        "/repos/octo/empty/contents/",
        404,
        "This repository is empty.",
    )
    .await;

    let err = provider.list_directory("empty", "").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn read_file_decodes_inline_base64() {
    let (server, provider) = common::setup().await;
    common::mount_file_contents(&server, "notes", "docs/a.txt", "sha-a", b"hello world").await;

    let content = provider.read_file("notes", "docs/a.txt").await.unwrap();
    assert_eq!(content.data, b"hello world");
    assert_eq!(content.hash.as_str(), "sha-a");
}

#[tokio::test]
async fn read_file_without_inline_content_fetches_raw() {
    let (server, provider) = common::setup().await;
    // metadata response omits the content field (file above the inline limit)
    Mock::given(method("GET"))
        .and(path("/repos/octo/notes/contents/big.bin"))
        .and(wiremock::matchers::header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "big.bin",
            "path": "big.bin",
            "sha": "sha-big",
            "size": 4,
            "type": "file",
            "content": "",
            "encoding": "none"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/notes/contents/big.bin"))
        .and(wiremock::matchers::header("Accept", "application/vnd.github.raw"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x01\x02\x03\x04".to_vec()))
        .mount(&server)
        .await;

    let content = provider.read_file("notes", "big.bin").await.unwrap();
    assert_eq!(content.data, vec![1, 2, 3, 4]);
    assert_eq!(content.hash.as_str(), "sha-big");
}

#[tokio::test]
async fn create_file_puts_base64_payload() {
    let (server, provider) = common::setup().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/notes/contents/new.txt"))
        .and(body_partial_json(serde_json::json!({
            "message": "Upload new.txt",
            "content": "aGk="
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "content": { "sha": "sha-new" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    provider
        .create_file("notes", "new.txt", b"hi", "Upload new.txt")
        .await
        .unwrap();
}

#[tokio::test]
async fn update_file_sends_expected_sha() {
    let (server, provider) = common::setup().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octo/notes/contents/a.txt"))
        .and(body_partial_json(serde_json::json!({ "sha": "sha-old" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": { "sha": "sha-new" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hash = ContentHash::new("sha-old").unwrap();
    provider
        .update_file("notes", "a.txt", b"v2", &hash, "Upload a.txt")
        .await
        .unwrap();
}

#[tokio::test]
async fn stale_sha_surfaces_as_version_conflict() {
    let (server, provider) = common::setup().await;
    common::mount_error(
        &server,
        "PUT",
        "/repos/octo/notes/contents/a.txt",
        409,
        "a.txt is at abc123 but expected def456",
    )
    .await;

    let hash = ContentHash::new("def456").unwrap();
    let err = provider
        .update_file("notes", "a.txt", b"v2", &hash, "Upload a.txt")
        .await
        .unwrap_err();
    assert!(err.is_version_conflict());
    assert!(err.to_string().contains("refresh and retry"));
}

#[tokio::test]
async fn rate_limited_forbidden_is_classified() {
    let (server, provider) = common::setup().await;
    common::mount_error(
        &server,
        "GET",
        "/repos/octo/notes/contents/a.txt",
        403,
        "API rate limit exceeded for installation",
    )
    .await;

    let err = provider.read_file("notes", "a.txt").await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn plain_forbidden_is_permission_or_too_large() {
    let (server, provider) = common::setup().await;
    common::mount_error(
        &server,
        "GET",
        "/repos/octo/notes/contents/huge.bin",
        403,
        "This API returns blobs up to 1 MB in size.",
    )
    .await;

    let err = provider.read_file("notes", "huge.bin").await.unwrap_err();
    assert!(matches!(err, OperationError::PermissionOrTooLarge(_)));
}

#[tokio::test]
async fn delete_file_sends_sha_in_body() {
    let (server, provider) = common::setup().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/octo/notes/contents/a.txt"))
        .and(body_partial_json(serde_json::json!({
            "message": "Delete item via app",
            "sha": "sha-a"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hash = ContentHash::new("sha-a").unwrap();
    provider
        .delete_file("notes", "a.txt", &hash, "Delete item via app")
        .await
        .unwrap();
}

#[tokio::test]
async fn get_path_metadata_distinguishes_file_and_dir() {
    let (server, provider) = common::setup().await;
    common::mount_file_contents(&server, "notes", "a.txt", "sha-a", b"x").await;
    common::mount_dir_listing(
        &server,
        "notes",
        "docs",
        serde_json::json!([common::file_item("docs/b.txt", "sha-b", 1)]),
    )
    .await;

    let file = provider.get_path_metadata("notes", "a.txt").await.unwrap();
    assert!(file.is_file());

    let dir = provider.get_path_metadata("notes", "docs").await.unwrap();
    assert!(!dir.is_file());
    assert_eq!(dir.path, "docs");

    common::mount_error(
        &server,
        "GET",
        "/repos/octo/notes/contents/missing.txt",
        404,
        "Not Found",
    )
    .await;
    let err = provider
        .get_path_metadata("notes", "missing.txt")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
