//! Error types for resource resolution and binding.
//!
//! This module maps transport outcomes and lookup failures to semantic
//! errors:
//!
//! - **404** on a fetch becomes [`ResourceError::NotFound`]
//! - an unrecognized member or top-level name becomes
//!   [`ResourceError::UnresolvedName`], never a silent `None`
//! - transport faults pass through unmodified as [`ResourceError::Http`]
//!
//! A server-side validation rejection (422) during create/update is *not* an
//! error value: it is recorded field-by-field on the [`Resource`] itself,
//! which stays usable and re-savable.
//!
//! [`Resource`]: crate::rest::Resource

use std::collections::HashMap;

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A dynamic lookup matched neither an attribute nor a known resource type.
    #[error("No attribute or resource type matches '{name}'")]
    UnresolvedName {
        /// The name that failed to resolve.
        name: String,
    },

    /// The resource was not found (HTTP 404).
    #[error("{resource} at '{path}' not found")]
    NotFound {
        /// The type name of the resource (e.g., "Message").
        resource: String,
        /// The path that was requested.
        path: String,
    },

    /// An operation that needs a persisted identifier was called on a new record.
    #[error("{resource} has no identifier yet; save it first")]
    MissingId {
        /// The type name of the resource.
        resource: String,
    },

    /// The server returned a payload shape the operation cannot use.
    #[error("Unexpected payload shape for {resource} at '{path}'")]
    UnexpectedPayload {
        /// The type name of the resource.
        resource: String,
        /// The path that was requested.
        path: String,
    },

    /// The server rejected the request with a status this layer has no
    /// mapping for (anything outside 2xx/404/422).
    #[error("Server returned HTTP {code} for '{path}': {body}")]
    Server {
        /// The HTTP status code.
        code: u16,
        /// The path that was requested.
        path: String,
        /// The response body, serialized.
        body: String,
    },

    /// A transport-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Parses the field-to-message map from a create/update rejection body.
///
/// The wire shape for a rejection is a flat JSON object mapping field names
/// to messages:
///
/// ```json
/// {"body": "can't be blank"}
/// ```
///
/// A nested `{"errors": {...}}` wrapper is tolerated by descending into it;
/// array messages collapse to their first entry.
pub(crate) fn rejection_errors(body: &serde_json::Value) -> HashMap<String, String> {
    let body = body.get("errors").unwrap_or(body);

    let mut result = HashMap::new();
    if let serde_json::Value::Object(map) = body {
        for (field, message) in map {
            let text = match message {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(arr) => arr
                    .first()
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                other => other.to_string(),
            };
            result.insert(field.clone(), text);
        }
    }
    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
