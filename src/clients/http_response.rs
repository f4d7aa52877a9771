//! HTTP response wrapper for the transport layer.

use serde_json::Value;

/// A parsed HTTP response from the remote API.
///
/// Holds the status code and the response body parsed as JSON. An empty or
/// unparseable body is represented as an empty JSON object so callers can
/// always index into `body` without a separate `Option` dance.
///
/// # Example
///
/// ```rust
/// use comm_api::clients::HttpResponse;
/// use serde_json::json;
///
/// let response = HttpResponse::new(200, json!({"id": 1}));
/// assert!(response.is_ok());
/// assert_eq!(response.body["id"], 1);
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The response body parsed as JSON.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new response from a status code and parsed body.
    #[must_use]
    pub const fn new(code: u16, body: Value) -> Self {
        Self { code, body }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the status code indicates a validation rejection (422).
    #[must_use]
    pub const fn is_unprocessable(&self) -> bool {
        self.code == 422
    }
}
