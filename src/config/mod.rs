//! Configuration types for the REST resource client.
//!
//! This module provides the validated value types a [`Connection`] is
//! constructed from. All validation happens on construction (fail-fast);
//! once built, the values are immutable and there is no process-global
//! configuration anywhere in the crate.
//!
//! # Overview
//!
//! - [`ApiToken`]: the basic-auth username, validated non-empty
//! - [`ApiPassword`]: the basic-auth password, validated non-empty, with
//!   masked debug output
//! - [`BaseUrl`]: the remote endpoint, validated for scheme and host
//!
//! # Example
//!
//! ```rust
//! use comm_api::{ApiPassword, ApiToken, BaseUrl};
//!
//! let token = ApiToken::new("my-token").unwrap();
//! let password = ApiPassword::new("my-password").unwrap();
//! let base_url = BaseUrl::new("https://txtmanager.example.com").unwrap();
//! ```
//!
//! [`Connection`]: crate::rest::Connection

mod newtypes;

pub use newtypes::{ApiPassword, ApiToken, BaseUrl};
