//! HTTP client for communicating with the remote API.
//!
//! This module provides the [`HttpClient`] type for making basic-auth
//! JSON requests against the `{base_url}/api` root.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiPassword, ApiToken, BaseUrl};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the remote API.
///
/// The client handles:
/// - API root construction (`{base_url}/api`)
/// - HTTP basic authentication on every request
/// - `.json` path normalization
/// - JSON body parsing
///
/// Every received HTTP response is returned as `Ok(HttpResponse)`, whatever
/// its status code; only transport faults are errors. Status interpretation
/// belongs to the resource layer.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use comm_api::clients::HttpClient;
/// use comm_api::{ApiPassword, ApiToken, BaseUrl};
///
/// let client = HttpClient::new(
///     &BaseUrl::new("https://txtmanager.example.com").unwrap(),
///     ApiToken::new("token").unwrap(),
///     ApiPassword::new("password").unwrap(),
/// );
///
/// let response = client.get("messages", None).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// API root (e.g., `https://txtmanager.example.com/api`).
    api_root: String,
    /// Basic-auth username.
    token: ApiToken,
    /// Basic-auth password.
    password: ApiPassword,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given endpoint and credentials.
    ///
    /// No network call is performed here; the first request happens when a
    /// method like [`get`](Self::get) is awaited.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(base_url: &BaseUrl, token: ApiToken, password: ApiPassword) -> Self {
        let api_root = format!("{}/api", base_url.as_ref());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_root,
            token,
            password,
        }
    }

    /// Returns the API root for this client.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The resource path (e.g., "messages", "/messages/2")
    /// * `query` - Optional query parameters
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if the path is empty after
    /// normalization, or [`HttpError::Network`] for transport failures.
    pub async fn get(
        &self,
        path: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.url_for(path)?;
        tracing::debug!(method = "GET", %url, "dispatching request");

        let mut builder = self
            .client
            .get(&url)
            .basic_auth(self.token.as_ref(), Some(self.password.as_ref()))
            .header("Accept", "application/json")
            .header("User-Agent", user_agent());

        if let Some(params) = query {
            builder = builder.query(params);
        }

        let res = builder.send().await?;
        Ok(parse_response(res).await)
    }

    /// Sends a POST request with a JSON body to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if the path is empty after
    /// normalization, or [`HttpError::Network`] for transport failures.
    pub async fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, HttpError> {
        self.send_with_body(reqwest::Method::POST, path, body).await
    }

    /// Sends a PUT request with a JSON body to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if the path is empty after
    /// normalization, or [`HttpError::Network`] for transport failures.
    pub async fn put(&self, path: &str, body: &Value) -> Result<HttpResponse, HttpError> {
        self.send_with_body(reqwest::Method::PUT, path, body).await
    }

    async fn send_with_body(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &Value,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.url_for(path)?;
        tracing::debug!(method = %method, %url, "dispatching request");

        let res = self
            .client
            .request(method, &url)
            .basic_auth(self.token.as_ref(), Some(self.password.as_ref()))
            .header("Accept", "application/json")
            .header("User-Agent", user_agent())
            .json(body)
            .send()
            .await?;

        Ok(parse_response(res).await)
    }

    /// Builds the full URL for a resource path.
    fn url_for(&self, path: &str) -> Result<String, HttpError> {
        let normalized = normalize_path(path)?;
        Ok(format!("{}/{}", self.api_root, normalized))
    }
}

/// Builds the User-Agent header value.
fn user_agent() -> String {
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("Comm API Library v{SDK_VERSION} | Rust {rust_version}")
}

/// Parses a reqwest response into an [`HttpResponse`].
///
/// An empty or unparseable body becomes an empty JSON object rather than an
/// error; the status code carries the failure signal in that case.
async fn parse_response(res: reqwest::Response) -> HttpResponse {
    let code = res.status().as_u16();
    let body_text = res.text().await.unwrap_or_default();

    let body = if body_text.is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_str(&body_text).unwrap_or_else(|_| serde_json::json!({}))
    };

    HttpResponse::new(code, body)
}

/// Normalizes a REST API path.
///
/// This function:
/// 1. Strips leading `/` characters
/// 2. Strips a trailing `.json` suffix
/// 3. Appends the `.json` suffix
/// 4. Returns an error for empty paths
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(normalize_path("messages")?, "messages.json");
/// assert_eq!(normalize_path("/messages")?, "messages.json");
/// assert_eq!(normalize_path("messages.json")?, "messages.json");
/// assert_eq!(normalize_path("/messages/2")?, "messages/2.json");
/// ```
pub(crate) fn normalize_path(path: &str) -> Result<String, HttpError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(HttpError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_client() -> HttpClient {
        HttpClient::new(
            &BaseUrl::new("https://txtmanager.example.com").unwrap(),
            ApiToken::new("test-token").unwrap(),
            ApiPassword::new("test-password").unwrap(),
        )
    }

    // === Path Normalization Tests ===

    #[test]
    fn test_normalize_path_strips_leading_slash() {
        assert_eq!(normalize_path("/messages").unwrap(), "messages.json");
    }

    #[test]
    fn test_normalize_path_strips_trailing_json() {
        assert_eq!(normalize_path("messages.json").unwrap(), "messages.json");
    }

    #[test]
    fn test_normalize_path_adds_json_suffix() {
        assert_eq!(normalize_path("messages").unwrap(), "messages.json");
    }

    #[test]
    fn test_normalize_path_handles_nested_paths() {
        assert_eq!(normalize_path("/messages/2").unwrap(), "messages/2.json");
    }

    #[test]
    fn test_normalize_path_handles_double_slashes() {
        assert_eq!(normalize_path("//messages").unwrap(), "messages.json");
    }

    #[test]
    fn test_normalize_path_empty_path_returns_error() {
        let result = normalize_path("");
        assert!(matches!(result, Err(HttpError::InvalidPath { path }) if path.is_empty()));
    }

    #[test]
    fn test_normalize_path_only_slash_returns_error() {
        let result = normalize_path("/");
        assert!(matches!(result, Err(HttpError::InvalidPath { path }) if path.is_empty()));
    }

    // === Client Construction Tests ===

    #[test]
    fn test_client_constructs_api_root() {
        let client = create_test_client();
        assert_eq!(client.api_root(), "https://txtmanager.example.com/api");
    }

    #[test]
    fn test_url_for_joins_api_root_and_path() {
        let client = create_test_client();
        assert_eq!(
            client.url_for("/messages").unwrap(),
            "https://txtmanager.example.com/api/messages.json"
        );
    }

    #[test]
    fn test_client_debug_masks_password() {
        let client = create_test_client();
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-password"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.contains("Comm API Library v"));
        assert!(ua.contains("Rust"));
    }
}
