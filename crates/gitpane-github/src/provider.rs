//! `IRemoteRepository` implementation backed by the GitHub contents API
//!
//! Every method is one or two HTTP calls against per-file endpoints. The
//! contents endpoint returns an object for a file and an array for a
//! directory, and answers 404 for the root of an empty repository - the
//! resolver and workers rely on that shape.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use gitpane_core::domain::errors::OperationError;
use gitpane_core::domain::remote_entry::{ContentHash, RemoteEntry};
use gitpane_core::ports::remote_repository::{FileContent, IRemoteRepository, RepositoryInfo};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::GithubClient;

/// Repository object from /user/repos and /repos/{owner}/{repo}
#[derive(Debug, Deserialize)]
struct RepoDto {
    name: String,
    description: Option<String>,
    language: Option<String>,
    default_branch: Option<String>,
    private: Option<bool>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    html_url: Option<String>,
    clone_url: Option<String>,
    ssh_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl RepoDto {
    fn into_info(self) -> RepositoryInfo {
        RepositoryInfo {
            name: self.name,
            description: self.description,
            language: self.language,
            default_branch: self.default_branch.unwrap_or_else(|| "main".to_string()),
            private: self.private.unwrap_or(false),
            stars: self.stargazers_count.unwrap_or(0),
            forks: self.forks_count.unwrap_or(0),
            html_url: self.html_url.unwrap_or_default(),
            clone_url: self.clone_url.unwrap_or_default(),
            ssh_url: self.ssh_url.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// One item from the contents endpoint
#[derive(Debug, Deserialize)]
struct ContentItemDto {
    #[allow(dead_code)]
    name: String,
    path: String,
    sha: String,
    size: Option<u64>,
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    encoding: Option<String>,
}

/// A file or directory listing from the contents endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentItemDto>),
    Single(ContentItemDto),
}

fn entry_from_dto(repo: &str, dto: &ContentItemDto) -> Result<RemoteEntry, OperationError> {
    if dto.kind == "dir" {
        Ok(RemoteEntry::dir(repo, dto.path.clone()))
    } else {
        let hash = ContentHash::new(dto.sha.clone())
            .map_err(|e| OperationError::Generic(format!("{}: {}", dto.path, e)))?;
        Ok(RemoteEntry::file(
            repo,
            dto.path.clone(),
            Some(hash),
            dto.size,
        ))
    }
}

/// GitHub-backed remote repository adapter
pub struct GithubRepositoryClient {
    client: GithubClient,
    owner: String,
}

impl GithubRepositoryClient {
    pub fn new(client: GithubClient, owner: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
        }
    }

    /// Verifies credentials and resolves the owner from /user
    pub async fn connect(client: GithubClient) -> Result<Self, OperationError> {
        #[derive(Deserialize)]
        struct UserDto {
            login: String,
        }

        let response = client
            .request(Method::GET, "/user")
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(client.classify_response("authenticating", response).await);
        }
        let user: UserDto = response.json().await.map_err(transport_error)?;
        debug!(login = %user.login, "Authenticated with GitHub");
        Ok(Self::new(client, user.login))
    }

    fn contents_path(&self, repo: &str, path: &str) -> String {
        let trimmed = path.trim_matches('/');
        format!("/repos/{}/{}/contents/{}", self.owner, repo, trimmed)
    }

    async fn fetch_contents(
        &self,
        repo: &str,
        path: &str,
        context: &str,
    ) -> Result<ContentsResponse, OperationError> {
        let response = self
            .client
            .request(Method::GET, &self.contents_path(repo, path))
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(context, response).await);
        }
        response.json().await.map_err(transport_error)
    }

    /// Fetches raw file bytes, for files too large for inline base64
    async fn fetch_raw(&self, repo: &str, path: &str) -> Result<Vec<u8>, OperationError> {
        let response = self
            .client
            .request(Method::GET, &self.contents_path(repo, path))
            .header("Accept", "application/vnd.github.raw")
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(path, response).await);
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

fn transport_error(err: reqwest::Error) -> OperationError {
    OperationError::Generic(format!("Request failed: {}", err))
}

/// Decodes GitHub's newline-wrapped base64 content field
fn decode_content(path: &str, content: &str) -> Result<Vec<u8>, OperationError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| OperationError::Generic(format!("Bad base64 content for {}: {}", path, e)))
}

#[async_trait]
impl IRemoteRepository for GithubRepositoryClient {
    async fn list_repositories(&self) -> Result<Vec<RepositoryInfo>, OperationError> {
        let mut repos = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!("/user/repos?per_page=100&page={}&affiliation=owner", page);
            let response = self
                .client
                .request(Method::GET, &path)
                .send()
                .await
                .map_err(transport_error)?;
            if !response.status().is_success() {
                return Err(self
                    .client
                    .classify_response("listing repositories", response)
                    .await);
            }
            let batch: Vec<RepoDto> = response.json().await.map_err(transport_error)?;
            let last_page = batch.len() < 100;
            repos.extend(batch.into_iter().map(RepoDto::into_info));
            if last_page {
                break;
            }
            page += 1;
        }
        debug!(count = repos.len(), "Listed repositories");
        Ok(repos)
    }

    async fn list_directory(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RemoteEntry>, OperationError> {
        let context = format!("{}/{}", repo, path.trim_matches('/'));
        match self.fetch_contents(repo, path, &context).await? {
            ContentsResponse::Listing(items) => items
                .iter()
                .map(|dto| entry_from_dto(repo, dto))
                .collect(),
            ContentsResponse::Single(item) => Err(OperationError::Generic(format!(
                "{} is a file, not a directory",
                item.path
            ))),
        }
    }

    async fn read_file(&self, repo: &str, path: &str) -> Result<FileContent, OperationError> {
        let context = format!("{}/{}", repo, path.trim_matches('/'));
        let item = match self.fetch_contents(repo, path, &context).await? {
            ContentsResponse::Single(item) => item,
            ContentsResponse::Listing(_) => {
                return Err(OperationError::Generic(format!(
                    "{} is a directory, not a file",
                    context
                )))
            }
        };
        let hash = ContentHash::new(item.sha.clone())
            .map_err(|e| OperationError::Generic(format!("{}: {}", context, e)))?;

        // GitHub omits inline content above ~1 MiB; re-fetch the raw bytes
        let data = match (item.content.as_deref(), item.encoding.as_deref()) {
            (Some(content), Some("base64")) => decode_content(path, content)?,
            _ => self.fetch_raw(repo, path).await?,
        };
        Ok(FileContent { data, hash })
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        message: &str,
    ) -> Result<(), OperationError> {
        let body = json!({
            "message": message,
            "content": BASE64.encode(data),
        });
        let response = self
            .client
            .request(Method::PUT, &self.contents_path(repo, path))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(path, response).await);
        }
        debug!(repo, path, bytes = data.len(), "Created remote file");
        Ok(())
    }

    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        expected_hash: &ContentHash,
        message: &str,
    ) -> Result<(), OperationError> {
        let body = json!({
            "message": message,
            "content": BASE64.encode(data),
            "sha": expected_hash.as_str(),
        });
        let response = self
            .client
            .request(Method::PUT, &self.contents_path(repo, path))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(path, response).await);
        }
        debug!(repo, path, bytes = data.len(), "Updated remote file");
        Ok(())
    }

    async fn delete_file(
        &self,
        repo: &str,
        path: &str,
        expected_hash: &ContentHash,
        message: &str,
    ) -> Result<(), OperationError> {
        let body = json!({
            "message": message,
            "sha": expected_hash.as_str(),
        });
        let response = self
            .client
            .request(Method::DELETE, &self.contents_path(repo, path))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(path, response).await);
        }
        debug!(repo, path, "Deleted remote file");
        Ok(())
    }

    async fn delete_repository(&self, repo: &str) -> Result<(), OperationError> {
        let path = format!("/repos/{}/{}", self.owner, repo);
        let response = self
            .client
            .request(Method::DELETE, &path)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(repo, response).await);
        }
        debug!(repo, "Deleted repository");
        Ok(())
    }

    async fn rename_repository(
        &self,
        repo: &str,
        new_name: &str,
    ) -> Result<String, OperationError> {
        let path = format!("/repos/{}/{}", self.owner, repo);
        let response = self
            .client
            .request(Method::PATCH, &path)
            .json(&json!({ "name": new_name }))
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(repo, response).await);
        }
        let dto: RepoDto = response.json().await.map_err(transport_error)?;
        debug!(old = repo, new = %dto.name, "Renamed repository");
        Ok(dto.name)
    }

    async fn get_repository_metadata(
        &self,
        repo: &str,
    ) -> Result<RepositoryInfo, OperationError> {
        let path = format!("/repos/{}/{}", self.owner, repo);
        let response = self
            .client
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(self.client.classify_response(repo, response).await);
        }
        let dto: RepoDto = response.json().await.map_err(transport_error)?;
        Ok(dto.into_info())
    }

    async fn get_path_metadata(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<RemoteEntry, OperationError> {
        let context = format!("{}/{}", repo, path.trim_matches('/'));
        match self.fetch_contents(repo, path, &context).await? {
            ContentsResponse::Single(item) => entry_from_dto(repo, &item),
            // the contents endpoint answers with a listing for directories
            ContentsResponse::Listing(_) => Ok(RemoteEntry::dir(repo, path)),
        }
    }
}
