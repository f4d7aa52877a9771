//! Resource type descriptors and the startup-time registration table.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::rest::naming::{classify, pluralize, singularize};

/// Describes one resource type known to a connection.
///
/// A descriptor carries the three derived name forms used throughout the
/// crate: the conventional type name (`Message`), the singular resource name
/// used as the JSON body key (`message`), and the pluralized collection name
/// used in URLs and collection payloads (`messages`).
///
/// # Example
///
/// ```rust
/// use comm_api::rest::ResourceType;
///
/// let kind = ResourceType::derive("message").unwrap();
/// assert_eq!(kind.type_name(), "Message");
/// assert_eq!(kind.resource_name(), "message");
/// assert_eq!(kind.collection_name(), "messages");
/// assert_eq!(kind.collection_path(), "/messages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    type_name: String,
    resource_name: String,
    collection_name: String,
}

impl ResourceType {
    /// Derives a descriptor from a singular resource name.
    ///
    /// The collection name comes from the naming convention and must
    /// round-trip (`singularize(pluralize(name)) == name`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceName`] for names that are not
    /// lowercase identifiers, and [`ConfigError::IrregularPlural`] when the
    /// convention cannot invert the derived collection name.
    pub fn derive(name: &str) -> Result<Self, ConfigError> {
        validate_name(name)?;

        let collection = pluralize(name);
        let round_trip = singularize(&collection);
        if round_trip != name {
            return Err(ConfigError::IrregularPlural {
                name: name.to_string(),
                collection,
                round_trip,
            });
        }

        Ok(Self {
            type_name: classify(name),
            resource_name: name.to_string(),
            collection_name: collection,
        })
    }

    /// Builds a descriptor with an explicit collection name.
    ///
    /// This is the escape hatch for irregular plurals (`person`/`people`)
    /// that the convention cannot derive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceName`] if either name is not a
    /// lowercase identifier.
    pub fn with_collection(name: &str, collection: &str) -> Result<Self, ConfigError> {
        validate_name(name)?;
        validate_name(collection)?;

        Ok(Self {
            type_name: classify(name),
            resource_name: name.to_string(),
            collection_name: collection.to_string(),
        })
    }

    /// The conventional type name (e.g., `Message`).
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The singular resource name, used as the JSON body key (e.g., `message`).
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// The pluralized collection name (e.g., `messages`).
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// The URL segment under which this type's instances live (e.g., `/messages`).
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection_name)
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidResourceName {
            name: name.to_string(),
        })
    }
}

/// Resolves name tokens to registered resource types.
///
/// The registry replaces runtime name-to-type string manipulation with an
/// explicit table built once at startup. Every registration is validated for
/// naming round-trip correctness, so a convention mismatch fails during
/// setup instead of on first use.
///
/// Resolution accepts either form of a name: `resolve("message")` and
/// `resolve("messages")` find the same descriptor. Unknown tokens resolve to
/// `None`; callers decide how to surface that.
///
/// # Example
///
/// ```rust
/// use comm_api::rest::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register("message").unwrap();
/// registry.register_irregular("person", "people").unwrap();
///
/// assert!(registry.resolve("messages").is_some());
/// assert!(registry.resolve("people").is_some());
/// assert!(registry.resolve("widgets").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_resource_name: HashMap<String, ResourceType>,
    by_collection_name: HashMap<String, String>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource type by its singular name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IrregularPlural`] if the derived collection
    /// name does not round-trip, [`ConfigError::DuplicateType`] if either
    /// name is already taken, or [`ConfigError::InvalidResourceName`] for
    /// malformed names.
    pub fn register(&mut self, name: &str) -> Result<(), ConfigError> {
        self.insert(ResourceType::derive(name)?)
    }

    /// Registers a resource type with an explicit, irregular collection name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateType`] if either name is already
    /// taken, or [`ConfigError::InvalidResourceName`] for malformed names.
    pub fn register_irregular(&mut self, name: &str, collection: &str) -> Result<(), ConfigError> {
        self.insert(ResourceType::with_collection(name, collection)?)
    }

    fn insert(&mut self, kind: ResourceType) -> Result<(), ConfigError> {
        if self.by_resource_name.contains_key(kind.resource_name()) {
            return Err(ConfigError::DuplicateType {
                name: kind.resource_name().to_string(),
            });
        }
        if self.by_collection_name.contains_key(kind.collection_name()) {
            return Err(ConfigError::DuplicateType {
                name: kind.collection_name().to_string(),
            });
        }

        self.by_collection_name.insert(
            kind.collection_name().to_string(),
            kind.resource_name().to_string(),
        );
        self.by_resource_name
            .insert(kind.resource_name().to_string(), kind);
        Ok(())
    }

    /// Resolves a name token to a registered descriptor.
    ///
    /// The token is lowercased, matched against registered collection names
    /// first (covering irregular plurals), then singularized and matched
    /// against resource names. Unknown tokens yield `None`.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&ResourceType> {
        let token = token.to_lowercase();

        if let Some(resource_name) = self.by_collection_name.get(&token) {
            return self.by_resource_name.get(resource_name);
        }

        self.by_resource_name.get(&singularize(&token))
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_resource_name.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_resource_name.is_empty()
    }
}
