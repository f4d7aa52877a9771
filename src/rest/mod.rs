//! Schemaless REST resources over a registered type table.
//!
//! This module is the heart of the crate:
//!
//! - **[`TypeRegistry`] / [`ResourceType`]**: the startup-time table of known
//!   resource types and their derived name forms
//! - **[`Connection`]**: the entry point; resolves top-level name lookups and
//!   binds JSON payloads to resources
//! - **[`Resource`]**: one record, with dynamic attribute access, nested
//!   fetches, `save`, and `reload`
//! - **[`ResourceCollection`]**: a live, ordered set of records with
//!   `find_by_id`, `first_matching`, and `create`
//! - **[`AttributeBag`]**: the case-normalized attribute store behind every
//!   resource
//! - **[`naming`]**: the pluralization convention names are derived with
//!
//! # Example
//!
//! ```rust,ignore
//! use comm_api::{ApiPassword, ApiToken, BaseUrl, Connection, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register("message")?;
//! registry.register("attachment")?;
//!
//! let connection = Connection::new(
//!     ApiToken::new("token")?,
//!     ApiPassword::new("password")?,
//!     &BaseUrl::new("https://txtmanager.example.com")?,
//!     registry,
//! );
//!
//! let messages = connection.lookup("messages").await?.many().unwrap();
//! let first = &messages[0];
//! println!("{}", first["body"]);
//!
//! let attachments = first.member("attachments").await?;
//! ```

mod attributes;
mod collection;
mod connection;
mod errors;
pub mod naming;
mod registry;
mod resource;

pub use attributes::AttributeBag;
pub use collection::ResourceCollection;
pub use connection::{Connection, Fetched, ServerResult};
pub use errors::ResourceError;
pub use registry::{ResourceType, TypeRegistry};
pub use resource::{MemberLookup, MemberValue, Resource};
