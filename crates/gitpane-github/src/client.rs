//! GitHub REST API client
//!
//! A thin typed wrapper over `reqwest` that owns authentication headers,
//! base URL construction, and the mapping from HTTP failures to the
//! classified [`OperationError`] taxonomy. All endpoint logic lives in
//! [`crate::provider`].

use gitpane_core::domain::errors::OperationError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the GitHub REST API
const GITHUB_BASE_URL: &str = "https://api.github.com";

/// Sent with every request; GitHub rejects requests without a user agent
const USER_AGENT: &str = concat!("gitpane/", env!("CARGO_PKG_VERSION"));

/// Error body shape returned by most GitHub endpoints
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for GitHub REST API calls
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// Creates a client authenticated with a personal access token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: GITHUB_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Creates a client against a custom base URL (useful for testing)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Prepends the base URL and adds the Authorization, Accept and
    /// User-Agent headers GitHub requires.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    /// Maps a non-success response into a classified error, consuming the
    /// body for its `message` field
    pub async fn classify_response(&self, context: &str, response: Response) -> OperationError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_default();
        debug!(%status, context, api_message = %message, "GitHub request failed");
        classify(status, context, &message)
    }
}

/// Pure classification of a GitHub status plus error message
///
/// `context` names the item being operated on and is woven into the
/// resulting message so per-item errors stay readable in the log panel.
pub fn classify(status: StatusCode, context: &str, message: &str) -> OperationError {
    let detail = if message.is_empty() {
        format!("{} (HTTP {})", context, status.as_u16())
    } else {
        format!("{}: {}", context, message)
    };
    let lowered = message.to_ascii_lowercase();

    match status {
        StatusCode::NOT_FOUND => OperationError::NotFound(detail),
        StatusCode::TOO_MANY_REQUESTS => OperationError::RateLimited(detail),
        StatusCode::FORBIDDEN if lowered.contains("rate limit") => {
            OperationError::RateLimited(detail)
        }
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
            OperationError::PermissionOrTooLarge(detail)
        }
        StatusCode::CONFLICT => OperationError::VersionConflict(detail),
        StatusCode::UNPROCESSABLE_ENTITY
            if lowered.contains("sha") || lowered.contains("does not match") =>
        {
            OperationError::VersionConflict(detail)
        }
        _ => OperationError::Generic(detail),
    }
}
