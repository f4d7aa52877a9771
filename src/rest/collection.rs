//! Live, ordered collections of resources.

use crate::rest::attributes::AttributeBag;
use crate::rest::connection::{Connection, Fetched};
use crate::rest::errors::ResourceError;
use crate::rest::registry::ResourceType;
use crate::rest::resource::Resource;

/// An ordered sequence of [`Resource`]s sharing a collection path, a
/// resolved type, and the connection that produced them.
///
/// A collection is "live": it remembers where it came from, so
/// [`find_by_id`](Self::find_by_id) and [`create`](Self::create) route back
/// through the same connection and path. Re-pointing the collection with
/// [`set_collection_path`](Self::set_collection_path) or
/// [`set_connection`](Self::set_connection) cascades to every member, so the
/// invariant that members match their collection always holds.
///
/// Collections are only produced by collection-shaped fetches; their length
/// changes only when [`create`](Self::create) appends a newly persisted
/// record.
///
/// # Example
///
/// ```rust,ignore
/// let messages = connection.lookup("messages").await?.many().unwrap();
/// assert_eq!(messages[0]["body"], serde_json::json!("hi"));
///
/// let second = messages.find_by_id("2").await?;
/// let drafts = messages.first_matching(|m| m.read_attribute("draft").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ResourceCollection {
    items: Vec<Resource>,
    kind: ResourceType,
    collection_path: String,
    connection: Connection,
}

impl ResourceCollection {
    pub(crate) const fn from_parts(
        items: Vec<Resource>,
        kind: ResourceType,
        collection_path: String,
        connection: Connection,
    ) -> Self {
        Self {
            items,
            kind,
            collection_path,
            connection,
        }
    }

    /// Returns the resolved type descriptor shared by every member.
    #[must_use]
    pub const fn kind(&self) -> &ResourceType {
        &self.kind
    }

    /// Returns the collection path members were fetched from.
    #[must_use]
    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// Returns the connection this collection routes its calls through.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the member at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.items.get(index)
    }

    /// Iterates over the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }

    /// Re-points the collection, and every member, at a new path.
    pub fn set_collection_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        for item in &mut self.items {
            item.set_collection_path(path.clone());
        }
        self.collection_path = path;
    }

    /// Re-wires the collection, and every member, to a new connection.
    pub fn set_connection(&mut self, connection: Connection) {
        for item in &mut self.items {
            item.set_connection(connection.clone());
        }
        self.connection = connection;
    }

    /// Fetches one member by identifier.
    ///
    /// URL-encodes `id`, issues `GET {collection_path}/{id}.json`, and stamps
    /// the collection's own path onto the result so the found record saves
    /// and navigates against the right base path. This always goes to the
    /// network; to scan the already-fetched members, use
    /// [`first_matching`](Self::first_matching).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedPayload`] if the server answers
    /// with a collection shape, plus anything [`Connection::fetch`] returns
    /// (notably [`ResourceError::NotFound`]).
    pub async fn find_by_id(&self, id: impl std::fmt::Display) -> Result<Resource, ResourceError> {
        let segment = urlencoding::encode(&id.to_string()).into_owned();
        let path = format!("{}/{}", self.collection_path, segment);

        match self.connection.fetch(&path, &self.kind, None).await? {
            Fetched::One(mut resource) => {
                resource.set_collection_path(self.collection_path.clone());
                Ok(resource)
            }
            Fetched::Many(_) => Err(ResourceError::UnexpectedPayload {
                resource: self.kind.type_name().to_string(),
                path,
            }),
        }
    }

    /// Returns the first already-fetched member matching `predicate`.
    ///
    /// Purely local; no network call. The counterpart of
    /// [`find_by_id`](Self::find_by_id).
    pub fn first_matching<P>(&self, mut predicate: P) -> Option<&Resource>
    where
        P: FnMut(&Resource) -> bool,
    {
        self.items.iter().find(|resource| predicate(resource))
    }

    /// Creates a new member from `attributes` and saves it.
    ///
    /// The record is wired to the collection's path and connection before
    /// saving. On acceptance it is appended to the collection; on a
    /// validation rejection it is *not* appended, but is still returned so
    /// the caller can inspect [`errors`](Resource::errors) and
    /// [`is_new_record`](Resource::is_new_record).
    ///
    /// # Errors
    ///
    /// Transport and protocol faults from the save surface as `Err`.
    pub async fn create(&mut self, attributes: AttributeBag) -> Result<Resource, ResourceError> {
        let mut resource = Resource::new(self.connection.clone(), self.kind.clone(), attributes);
        resource.set_collection_path(self.collection_path.clone());

        let accepted = resource.save().await?;
        if accepted {
            self.items.push(resource.clone());
        }

        Ok(resource)
    }
}

impl std::ops::Index<usize> for ResourceCollection {
    type Output = Resource;

    fn index(&self, index: usize) -> &Resource {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ResourceCollection {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ResourceCollection {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
