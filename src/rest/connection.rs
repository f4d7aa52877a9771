//! The connection: entry point for fetching and creating resources.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{HttpClient, HttpResponse};
use crate::config::{ApiPassword, ApiToken, BaseUrl};
use crate::rest::attributes::AttributeBag;
use crate::rest::collection::ResourceCollection;
use crate::rest::errors::{rejection_errors, ResourceError};
use crate::rest::registry::{ResourceType, TypeRegistry};
use crate::rest::resource::Resource;

/// The result of a fetch: one resource or a live collection of them.
///
/// A payload containing the resolved type's collection name (holding an
/// array) becomes [`Fetched::Many`]; any other JSON object becomes
/// [`Fetched::One`]. Callers pattern-match, or use [`Fetched::one`] /
/// [`Fetched::many`] when only one shape makes sense.
#[derive(Debug, Clone)]
pub enum Fetched {
    /// A single resource built from the whole payload.
    One(Resource),
    /// A collection built from the payload's collection-name field.
    Many(ResourceCollection),
}

impl Fetched {
    /// Returns the single resource, or `None` for a collection result.
    #[must_use]
    pub fn one(self) -> Option<Resource> {
        match self {
            Self::One(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }

    /// Returns the collection, or `None` for a single-resource result.
    #[must_use]
    pub fn many(self) -> Option<ResourceCollection> {
        match self {
            Self::One(_) => None,
            Self::Many(collection) => Some(collection),
        }
    }
}

/// The server's verdict on a create or update request.
///
/// Distinguished by HTTP status class, not payload shape: a 2xx is
/// [`Accepted`](Self::Accepted) carrying the representation to adopt, a 422
/// is [`Rejected`](Self::Rejected) carrying one message per offending field.
#[derive(Debug, Clone)]
pub enum ServerResult {
    /// The server persisted the record and returned its representation.
    Accepted(AttributeBag),
    /// The server rejected the record; one message per offending field.
    Rejected(HashMap<String, String>),
}

#[derive(Debug)]
struct ConnectionInner {
    http: HttpClient,
    registry: TypeRegistry,
}

/// An authenticated handle to a remote REST API.
///
/// The connection performs basic-auth HTTP calls against `{base_url}/api`,
/// converts JSON responses into [`Resource`] and [`ResourceCollection`]
/// values via its [`TypeRegistry`], and dispatches top-level name lookups
/// (`connection.lookup("messages")` fetches the messages collection).
///
/// Construction performs no network call. The connection holds no mutable
/// state, just the transport and the registry behind an `Arc`, so clones
/// are cheap and share the same underlying client. Every resource a
/// connection produces carries such a clone, which is what keeps collections
/// "live": items can be navigated, saved, and reloaded against the
/// connection that fetched them.
///
/// # Example
///
/// ```rust,ignore
/// use comm_api::{ApiPassword, ApiToken, BaseUrl, Connection, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// registry.register("message")?;
///
/// let connection = Connection::new(
///     ApiToken::new("token")?,
///     ApiPassword::new("password")?,
///     &BaseUrl::new("https://txtmanager.example.com")?,
///     registry,
/// );
///
/// let messages = connection.lookup("messages").await?.many().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Verify Connection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connection>();
};

impl Connection {
    /// Creates a new connection from credentials, an endpoint, and a type
    /// registry.
    ///
    /// The API root is `{base_url}/api`. No network call is performed here.
    #[must_use]
    pub fn new(
        token: ApiToken,
        password: ApiPassword,
        base_url: &BaseUrl,
        registry: TypeRegistry,
    ) -> Self {
        let http = HttpClient::new(base_url, token, password);
        Self {
            inner: Arc::new(ConnectionInner { http, registry }),
        }
    }

    /// Returns the type registry this connection resolves names against.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    /// Returns the API root this connection talks to.
    #[must_use]
    pub fn api_root(&self) -> &str {
        self.inner.http.api_root()
    }

    /// Fetches `path` and binds the payload to `kind`.
    ///
    /// Issues `GET {path}.json`. If the parsed object contains a field named
    /// after `kind`'s collection name holding an array, the result is a
    /// [`ResourceCollection`] whose members are all wired to `path` and this
    /// connection; otherwise the whole payload becomes a single [`Resource`],
    /// wired the same way.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for a 404,
    /// [`ResourceError::Server`] for any other non-2xx status, and
    /// [`ResourceError::Http`] for transport faults.
    pub async fn fetch(
        &self,
        path: &str,
        kind: &ResourceType,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Fetched, ResourceError> {
        let response = self.inner.http.get(path, query).await?;
        if !response.is_ok() {
            return Err(Self::status_error(&response, kind, path));
        }

        Ok(self.bind(&response.body, kind, path))
    }

    /// Creates a record of `kind` under `path`.
    ///
    /// Issues `POST {path}.json` with body
    /// `{ "<resource_name>": { ...attributes } }` and maps the status class:
    /// 2xx is [`ServerResult::Accepted`] with the representation to adopt,
    /// 422 is [`ServerResult::Rejected`] with one message per field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for a 404,
    /// [`ResourceError::Server`] for other non-2xx statuses, and
    /// [`ResourceError::Http`] for transport faults.
    pub async fn create(
        &self,
        path: &str,
        kind: &ResourceType,
        attributes: &AttributeBag,
    ) -> Result<ServerResult, ResourceError> {
        let body = wrap_attributes(kind, attributes);
        let response = self.inner.http.post(path, &body).await?;
        Self::verdict(response, kind, path)
    }

    /// Updates a record of `kind` at `path` with its full attribute set.
    ///
    /// Issues `PUT {path}.json` with the same body wrapping and status
    /// mapping as [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub async fn update(
        &self,
        path: &str,
        kind: &ResourceType,
        attributes: &AttributeBag,
    ) -> Result<ServerResult, ResourceError> {
        let body = wrap_attributes(kind, attributes);
        let response = self.inner.http.put(path, &body).await?;
        Self::verdict(response, kind, path)
    }

    /// Resolves a top-level name and fetches its collection.
    ///
    /// This is the explicit counterpart of dynamic member dispatch: the name
    /// is resolved against the registry, and on success the resolved type's
    /// collection path is fetched. `lookup("messages")` and
    /// `lookup("message")` both fetch `/messages`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnresolvedName`] if the registry does not
    /// know the name, plus everything [`fetch`](Self::fetch) can return.
    pub async fn lookup(&self, name: &str) -> Result<Fetched, ResourceError> {
        self.lookup_inner(name, None).await
    }

    /// Like [`lookup`](Self::lookup), with query parameters (conditions,
    /// page) forwarded to the request.
    ///
    /// # Errors
    ///
    /// Same as [`lookup`](Self::lookup).
    pub async fn lookup_with_query(
        &self,
        name: &str,
        query: &HashMap<String, String>,
    ) -> Result<Fetched, ResourceError> {
        self.lookup_inner(name, Some(query)).await
    }

    async fn lookup_inner(
        &self,
        name: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Fetched, ResourceError> {
        let kind = self
            .inner
            .registry
            .resolve(name)
            .cloned()
            .ok_or_else(|| ResourceError::UnresolvedName {
                name: name.to_string(),
            })?;

        tracing::debug!(name, kind = kind.type_name(), "resolved top-level name");
        let path = kind.collection_path();
        self.fetch(&path, &kind, query).await
    }

    /// Binds a successful payload to `kind`, wiring every resource to `path`
    /// and this connection.
    fn bind(&self, body: &Value, kind: &ResourceType, path: &str) -> Fetched {
        if let Some(items) = body.get(kind.collection_name()).and_then(Value::as_array) {
            let resources = items
                .iter()
                .map(|item| self.build_resource(kind, path, item))
                .collect();
            return Fetched::Many(ResourceCollection::from_parts(
                resources,
                kind.clone(),
                path.to_string(),
                self.clone(),
            ));
        }

        Fetched::One(self.build_resource(kind, path, body))
    }

    fn build_resource(&self, kind: &ResourceType, path: &str, data: &Value) -> Resource {
        Resource::from_payload(
            self.clone(),
            kind.clone(),
            path.to_string(),
            AttributeBag::from_value(data),
        )
    }

    /// Maps a create/update response to a [`ServerResult`].
    fn verdict(
        response: HttpResponse,
        kind: &ResourceType,
        path: &str,
    ) -> Result<ServerResult, ResourceError> {
        if response.is_ok() {
            return Ok(ServerResult::Accepted(AttributeBag::from_value(
                &response.body,
            )));
        }

        if response.is_unprocessable() {
            let errors = rejection_errors(&response.body);
            tracing::warn!(
                kind = kind.type_name(),
                path,
                fields = errors.len(),
                "server rejected record"
            );
            return Ok(ServerResult::Rejected(errors));
        }

        Err(Self::status_error(&response, kind, path))
    }

    /// Maps a non-2xx status to a semantic error.
    fn status_error(response: &HttpResponse, kind: &ResourceType, path: &str) -> ResourceError {
        if response.code == 404 {
            return ResourceError::NotFound {
                resource: kind.type_name().to_string(),
                path: path.to_string(),
            };
        }

        ResourceError::Server {
            code: response.code,
            path: path.to_string(),
            body: response.body.to_string(),
        }
    }
}

/// Wraps an attribute bag in the resource-name key for request bodies.
fn wrap_attributes(kind: &ResourceType, attributes: &AttributeBag) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(kind.resource_name().to_string(), attributes.to_value());
    Value::Object(body)
}
