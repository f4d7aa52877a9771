//! # Comm API Rust SDK
//!
//! A Rust client for the txtmanager messaging API, providing schemaless REST
//! resources, validated configuration newtypes, and an async basic-auth HTTP
//! client.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Validated newtypes for credentials and the server address via
//!   [`ApiToken`], [`ApiPassword`], and [`BaseUrl`]
//! - A startup-time [`TypeRegistry`] of known resource types with
//!   convention-derived names
//! - An instance-scoped [`Connection`] that resolves name lookups into
//!   [`Resource`] and [`ResourceCollection`] values
//! - Dynamic attribute access and nested-resource navigation without
//!   per-type structs
//! - `save`/`reload`/`create` with server validation errors recorded on the
//!   record instead of raised
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use comm_api::{ApiPassword, ApiToken, BaseUrl, Connection, TypeRegistry};
//!
//! // Declare the resource types the server exposes, once, at startup
//! let mut registry = TypeRegistry::new();
//! registry.register("message")?;
//! registry.register("attachment")?;
//!
//! let connection = Connection::new(
//!     ApiToken::new("your-token")?,
//!     ApiPassword::new("your-password")?,
//!     &BaseUrl::new("https://txtmanager.example.com")?,
//!     registry,
//! );
//!
//! // Fetch a collection by name
//! let mut messages = connection.lookup("messages").await?.many().unwrap();
//! println!("first body: {}", messages[0]["body"]);
//!
//! // Fetch one record by identifier
//! let message = messages.find_by_id("2").await?;
//!
//! // Navigate into a nested collection
//! let attachments = message.member("attachments").await?;
//!
//! // Create a record; validation failures land on the record, not in Err
//! let draft = messages
//!     .create(serde_json::json!({"body": "hello"}).as_object().cloned().unwrap().into())
//!     .await?;
//! if draft.is_new_record() {
//!     println!("rejected: {:?}", draft.errors());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Server address and credentials are instance-scoped
//!   on each [`Connection`]
//! - **Fail-fast validation**: Newtypes and type registrations validate on
//!   construction
//! - **Explicit resolution**: Unknown names are errors, never silent misses
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiPassword, ApiToken, BaseUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{HttpClient, HttpError, HttpResponse, SDK_VERSION};

// Re-export resource types
pub use rest::{
    AttributeBag, Connection, Fetched, MemberLookup, MemberValue, Resource, ResourceCollection,
    ResourceError, ResourceType, ServerResult, TypeRegistry,
};
