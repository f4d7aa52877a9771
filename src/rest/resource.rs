//! A single addressable entity backed by an attribute bag.

use std::collections::HashMap;

use serde_json::Value;

use crate::rest::attributes::AttributeBag;
use crate::rest::connection::{Connection, Fetched, ServerResult};
use crate::rest::errors::ResourceError;
use crate::rest::registry::ResourceType;

/// The outcome of resolving a member name against a resource, without I/O.
///
/// Member access is a two-stage lookup: attributes win, then registered
/// nested resource types, then an explicit miss. [`Resource::lookup`]
/// returns this tag; [`Resource::member`] dispatches on it (performing the
/// nested fetch for `NestedType`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberLookup<'a> {
    /// The name matches an attribute; here is its value.
    Attribute(&'a Value),
    /// The name resolves to a registered resource type nested under this one.
    NestedType(&'a ResourceType),
    /// The name matches neither an attribute nor a resource type.
    Unresolved,
}

/// The resolved value of a member access that may have required a fetch.
#[derive(Debug, Clone)]
pub enum MemberValue {
    /// An attribute value, cloned out of the bag.
    Attribute(Value),
    /// A nested fetch result (`message.attachments` and the like).
    Related(Fetched),
}

/// A single addressable entity.
///
/// A resource is an [`AttributeBag`] plus the wiring needed to act on it:
/// the [`Connection`] that produced it, the collection path it lives under,
/// and its resolved [`ResourceType`]. The identifier is the `id` attribute;
/// a resource without one is a new, unsaved record.
///
/// State machine: `New` → (save accepted) → `Persisted`; `New` → (save
/// rejected) → `New` with recorded [`errors`](Self::errors); `Persisted` →
/// (reload) → `Persisted` with a fresh bag. The bag is only ever replaced
/// wholesale; a failed operation never leaves it partially overwritten.
///
/// # Example
///
/// ```rust,ignore
/// let messages = connection.lookup("messages").await?.many().unwrap();
/// let message = messages.find_by_id("2").await?;
/// assert_eq!(message["body"], serde_json::json!("yo"));
///
/// // Navigate to a nested collection:
/// let attachments = message.member("attachments").await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    attributes: AttributeBag,
    errors: HashMap<String, String>,
    kind: ResourceType,
    collection_path: String,
    connection: Connection,
}

impl Resource {
    /// Creates a new, unsaved record from user-supplied attributes.
    ///
    /// The collection path defaults to the type's own; [`save`](Self::save)
    /// will POST there. Attributes containing an `id` are taken at face
    /// value and make the record count as persisted.
    #[must_use]
    pub fn new(connection: Connection, kind: ResourceType, attributes: AttributeBag) -> Self {
        let collection_path = kind.collection_path();
        Self {
            attributes,
            errors: HashMap::new(),
            kind,
            collection_path,
            connection,
        }
    }

    /// Builds a resource fresh from a network payload.
    pub(crate) fn from_payload(
        connection: Connection,
        kind: ResourceType,
        collection_path: String,
        attributes: AttributeBag,
    ) -> Self {
        Self {
            attributes,
            errors: HashMap::new(),
            kind,
            collection_path,
            connection,
        }
    }

    /// Returns the attribute bag.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Returns the resolved type descriptor.
    #[must_use]
    pub const fn kind(&self) -> &ResourceType {
        &self.kind
    }

    /// Returns the collection path this resource saves and navigates under.
    #[must_use]
    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// Returns the connection this resource routes its calls through.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Re-points this resource at a different collection path.
    pub fn set_collection_path(&mut self, path: impl Into<String>) {
        self.collection_path = path.into();
    }

    /// Re-wires this resource to a different connection.
    pub fn set_connection(&mut self, connection: Connection) {
        self.connection = connection;
    }

    /// Validation errors recorded by the last rejected save, one message per
    /// field. Empty after a successful save.
    #[must_use]
    pub const fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Returns the identifier attribute, if the record has one.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.attributes.get("id")
    }

    /// Returns `true` if the record has no identifier yet.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.id().is_none()
    }

    /// The path addressing this one record, or `None` for a new record.
    ///
    /// String identifiers are URL-encoded into the segment.
    #[must_use]
    pub fn resource_path(&self) -> Option<String> {
        let segment = self.id().map(id_segment)?;
        Some(format!("{}/{}", self.collection_path, segment))
    }

    /// Reads an attribute. Lookup is case-insensitive.
    #[must_use]
    pub fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Writes an attribute, returning the previous value if any.
    pub fn write_attribute(&mut self, name: &str, value: Value) -> Option<Value> {
        self.attributes.insert(name, value)
    }

    /// Resolves a member name without performing any I/O.
    ///
    /// Attributes shadow resource types: a field named `attachments` wins
    /// over a registered `attachment` type.
    #[must_use]
    pub fn lookup(&self, name: &str) -> MemberLookup<'_> {
        if let Some(value) = self.attributes.get(name) {
            return MemberLookup::Attribute(value);
        }
        if let Some(kind) = self.connection.registry().resolve(name) {
            return MemberLookup::NestedType(kind);
        }
        MemberLookup::Unresolved
    }

    /// Resolves a member name, fetching nested resources when needed.
    ///
    /// An attribute match returns its value. A resource-type match fetches
    /// the type's collection under this record's path
    /// (`{resource_path}/{collection_name}`), enabling navigation such as
    /// `message.member("attachments")`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnresolvedName`] when nothing matches,
    /// [`ResourceError::MissingId`] for a nested fetch from a new record,
    /// plus anything [`Connection::fetch`] can return.
    pub async fn member(&self, name: &str) -> Result<MemberValue, ResourceError> {
        match self.lookup(name) {
            MemberLookup::Attribute(value) => Ok(MemberValue::Attribute(value.clone())),
            MemberLookup::NestedType(kind) => {
                let kind = kind.clone();
                let base = self
                    .resource_path()
                    .ok_or_else(|| ResourceError::MissingId {
                        resource: self.kind.type_name().to_string(),
                    })?;
                let path = format!("{base}/{}", kind.collection_name());
                let fetched = self.connection.fetch(&path, &kind, None).await?;
                Ok(MemberValue::Related(fetched))
            }
            MemberLookup::Unresolved => Err(ResourceError::UnresolvedName {
                name: name.to_string(),
            }),
        }
    }

    /// Saves the record: POST for a new record, PUT for a persisted one.
    ///
    /// Returns `Ok(true)` when the server accepted the record: the bag is
    /// replaced wholesale with the server's representation (adopting any
    /// server-assigned identifier) and previous validation errors are
    /// cleared. Returns `Ok(false)` when the server rejected it: one error
    /// is recorded per offending field, the attributes stay exactly as the
    /// caller set them, and the record remains re-savable.
    ///
    /// # Errors
    ///
    /// Transport and protocol faults (anything other than acceptance or a
    /// 422 rejection) surface as `Err` without touching the record.
    pub async fn save(&mut self) -> Result<bool, ResourceError> {
        let result = if let Some(path) = self.resource_path() {
            self.connection
                .update(&path, &self.kind, &self.attributes)
                .await?
        } else {
            self.connection
                .create(&self.collection_path, &self.kind, &self.attributes)
                .await?
        };

        match result {
            ServerResult::Accepted(bag) => {
                self.attributes = bag;
                self.errors.clear();
                Ok(true)
            }
            ServerResult::Rejected(errors) => {
                self.errors = errors;
                Ok(false)
            }
        }
    }

    /// Refreshes the record from the server.
    ///
    /// A no-op for new records. Otherwise re-fetches the resource path and
    /// replaces the bag with the fresh copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedPayload`] if the resource path
    /// answers with a collection shape, plus anything
    /// [`Connection::fetch`] can return.
    pub async fn reload(&mut self) -> Result<&mut Self, ResourceError> {
        let Some(path) = self.resource_path() else {
            return Ok(self);
        };

        match self.connection.fetch(&path, &self.kind, None).await? {
            Fetched::One(fresh) => {
                self.attributes = fresh.attributes;
                Ok(self)
            }
            Fetched::Many(_) => Err(ResourceError::UnexpectedPayload {
                resource: self.kind.type_name().to_string(),
                path,
            }),
        }
    }
}

impl std::ops::Index<&str> for Resource {
    type Output = Value;

    /// Returns the attribute value for `name`.
    ///
    /// # Panics
    ///
    /// Panics if the attribute is not present; use
    /// [`Resource::read_attribute`] for fallible access.
    fn index(&self, name: &str) -> &Value {
        &self.attributes[name]
    }
}

/// Renders an identifier value as a URL path segment.
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => urlencoding::encode(s).into_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiPassword, ApiToken, BaseUrl};
    use crate::rest::registry::TypeRegistry;
    use serde_json::json;

    fn test_connection() -> Connection {
        let mut registry = TypeRegistry::new();
        registry.register("message").unwrap();
        registry.register("attachment").unwrap();
        Connection::new(
            ApiToken::new("token").unwrap(),
            ApiPassword::new("password").unwrap(),
            &BaseUrl::new("https://txtmanager.example.com").unwrap(),
            registry,
        )
    }

    fn message(attributes: serde_json::Value) -> Resource {
        let connection = test_connection();
        let kind = connection.registry().resolve("message").unwrap().clone();
        Resource::new(connection, kind, AttributeBag::from_value(&attributes))
    }

    #[test]
    fn test_new_record_has_no_id_and_no_resource_path() {
        let resource = message(json!({"body": "hi"}));
        assert!(resource.is_new_record());
        assert_eq!(resource.id(), None);
        assert_eq!(resource.resource_path(), None);
    }

    #[test]
    fn test_persisted_record_has_resource_path() {
        let resource = message(json!({"id": 7, "body": "hi"}));
        assert!(!resource.is_new_record());
        assert_eq!(resource.resource_path(), Some("/messages/7".to_string()));
    }

    #[test]
    fn test_string_id_is_url_encoded_in_resource_path() {
        let resource = message(json!({"id": "a b/c"}));
        assert_eq!(
            resource.resource_path(),
            Some("/messages/a%20b%2Fc".to_string())
        );
    }

    #[test]
    fn test_collection_path_defaults_to_type_path() {
        let resource = message(json!({}));
        assert_eq!(resource.collection_path(), "/messages");
    }

    #[test]
    fn test_attribute_read_write() {
        let mut resource = message(json!({"body": "hi"}));
        assert_eq!(resource.read_attribute("BODY"), Some(&json!("hi")));
        resource.write_attribute("body", json!("yo"));
        assert_eq!(resource["body"], json!("yo"));
    }

    #[test]
    fn test_lookup_prefers_attributes() {
        // A field literally named "attachments" shadows the registered type.
        let resource = message(json!({"id": 1, "attachments": 3}));
        assert_eq!(
            resource.lookup("attachments"),
            MemberLookup::Attribute(&json!(3))
        );
    }

    #[test]
    fn test_lookup_falls_through_to_registry() {
        let resource = message(json!({"id": 1}));
        match resource.lookup("attachments") {
            MemberLookup::NestedType(kind) => assert_eq!(kind.resource_name(), "attachment"),
            other => panic!("expected NestedType, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_unknown_name_is_unresolved() {
        let resource = message(json!({"id": 1}));
        assert_eq!(resource.lookup("widgets"), MemberLookup::Unresolved);
    }

    #[tokio::test]
    async fn test_member_returns_attribute_without_io() {
        let resource = message(json!({"body": "hi"}));
        match resource.member("body").await.unwrap() {
            MemberValue::Attribute(value) => assert_eq!(value, json!("hi")),
            MemberValue::Related(_) => panic!("expected Attribute"),
        }
    }

    #[tokio::test]
    async fn test_member_unresolved_name_errors() {
        let resource = message(json!({"body": "hi"}));
        let error = resource.member("widgets").await.unwrap_err();
        assert!(matches!(error, ResourceError::UnresolvedName { name } if name == "widgets"));
    }

    #[tokio::test]
    async fn test_member_nested_fetch_from_new_record_errors() {
        let resource = message(json!({"body": "hi"}));
        let error = resource.member("attachments").await.unwrap_err();
        assert!(matches!(error, ResourceError::MissingId { .. }));
    }

    #[test]
    fn test_set_collection_path_changes_resource_path() {
        let mut resource = message(json!({"id": 2}));
        resource.set_collection_path("/inbox/messages");
        assert_eq!(
            resource.resource_path(),
            Some("/inbox/messages/2".to_string())
        );
    }

    #[test]
    fn test_errors_start_empty() {
        let resource = message(json!({"body": "hi"}));
        assert!(resource.errors().is_empty());
    }
}
