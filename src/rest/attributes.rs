//! Case-insensitive attribute storage for resources.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A case-insensitive, string-keyed mapping holding a resource's raw field values.
///
/// Keys are normalized to lowercase on insertion, so lookups by `"id"`,
/// `"ID"`, and `"Id"` are equivalent. Values are raw [`serde_json::Value`]s
/// and are never coerced; the bag is mutated only through explicit write
/// operations.
///
/// # Example
///
/// ```rust
/// use comm_api::rest::AttributeBag;
/// use serde_json::json;
///
/// let mut bag = AttributeBag::new();
/// bag.insert("Body", json!("hi"));
/// assert_eq!(bag.get("body"), Some(&json!("hi")));
/// assert_eq!(bag.get("BODY"), Some(&json!("hi")));
/// assert_eq!(bag.get("subject"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag {
    fields: BTreeMap<String, Value>,
}

impl AttributeBag {
    /// Creates an empty attribute bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builds a bag from a JSON object, normalizing every key.
    ///
    /// Non-object values produce an empty bag; the caller decides whether
    /// that is an error.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map_or_else(Self::new, |map| {
            let fields = map
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect();
            Self { fields }
        })
    }

    /// Returns the value for `name`, if present. Lookup is case-insensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(&name.to_lowercase())
    }

    /// Returns `true` if a value for `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_lowercase())
    }

    /// Inserts a value under `name`, returning the previous value if any.
    pub fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        self.fields.insert(name.to_lowercase(), value)
    }

    /// Removes the value for `name`, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(&name.to_lowercase())
    }

    /// Returns the number of fields in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the bag holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs, names in normalized form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serializes the bag back to a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { fields }
    }
}

impl std::ops::Index<&str> for AttributeBag {
    type Output = Value;

    /// Returns the value for `name`.
    ///
    /// # Panics
    ///
    /// Panics if the field is not present; use [`AttributeBag::get`] for
    /// fallible access.
    fn index(&self, name: &str) -> &Value {
        self.get(name)
            .unwrap_or_else(|| panic!("no attribute named '{name}'"))
    }
}

impl Serialize for AttributeBag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::deserialize(deserializer)?;
        Ok(Self::from(map))
    }
}
