//! HTTP transport types for the REST resource client.
//!
//! This module provides the transport collaborator consumed by the resource
//! layer in [`crate::rest`]:
//!
//! - [`HttpClient`]: basic-auth JSON client rooted at `{base_url}/api`
//! - [`HttpResponse`]: status code plus parsed JSON body
//! - [`HttpError`]: transport-level failures
//!
//! The contract is deliberately small: `get`/`post`/`put` against
//! `.json`-suffixed paths, returning whatever response the server produced.
//! Retries, caching, and status-code semantics are out of scope here.

mod errors;
mod http_client;
mod http_response;

pub use errors::HttpError;
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;
