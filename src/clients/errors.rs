//! HTTP-specific error types for the transport layer.
//!
//! This module contains error types for HTTP operations. The transport
//! deliberately reports *every received response* as a success value
//! ([`HttpResponse`]), because the resource layer needs non-2xx bodies (for
//! example a 422 validation rejection) intact. Only faults that prevent a
//! response from arriving at all are errors here.
//!
//! # Example
//!
//! ```rust,ignore
//! use comm_api::clients::{HttpClient, HttpError};
//!
//! match client.get("messages", None).await {
//!     Ok(response) => println!("HTTP {}: {}", response.code, response.body),
//!     Err(HttpError::InvalidPath { path }) => {
//!         println!("Bad path: {path:?}");
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {e}");
//!     }
//! }
//! ```
//!
//! [`HttpResponse`]: crate::clients::HttpResponse

use thiserror::Error;

/// Unified error type for transport-level failures.
///
/// This enum covers errors raised before a request is sent (path validation)
/// or while sending it (network faults). Non-2xx HTTP responses are *not*
/// represented here; they come back as ordinary [`HttpResponse`] values and
/// are mapped to semantic errors by the resource layer.
///
/// [`HttpResponse`]: crate::clients::HttpResponse
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request path is empty after normalization.
    #[error("Invalid REST API path: '{path}'")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
