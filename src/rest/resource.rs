//! Resource nodes and CRUD dispatch.
//!
//! A [`Resource`] is a named node in the tree built by `register`. It stores
//! its own URL template (never concatenated with its parent's) and a shared
//! handle to the client's [`HttpClient`], which every CRUD call goes through.
//!
//! | Method     | HTTP method |
//! |------------|-------------|
//! | `read`     | GET         |
//! | `create`   | POST        |
//! | `update`   | PUT         |
//! | `remove`   | DELETE      |
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{ApiUrl, ClientConfig, RestClient};
//! use serde_json::json;
//!
//! let client = RestClient::new(
//!     ClientConfig::builder()
//!         .api(ApiUrl::new("https://gitlab.com/api/v3")?)
//!         .build()?,
//! );
//!
//! let users = client.register("/users/:id", "users")?;
//! let keys = users.register("/users/:uid/keys", "keys")?;
//!
//! // GET https://gitlab.com/api/v3/users/1596/keys?uid=1596
//! let response = keys.read(json!({"uid": 1596})).await?;
//! println!("{} {}", response.code, response.body);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpResponse, Payload, RequestOptions};
use crate::rest::registry::Registry;
use crate::rest::{join_url, RegisterError};

pub(crate) struct ResourceNode {
    pub(crate) name: String,
    pub(crate) qualified_name: String,
    pub(crate) url_template: String,
    pub(crate) owner: Arc<HttpClient>,
    pub(crate) parent: Weak<ResourceNode>,
    pub(crate) children: Registry,
}

/// A handle to a registered resource.
///
/// Handles are cheap to clone; clones refer to the same node. Use
/// [`Resource::ptr_eq`] to check node identity.
#[derive(Clone)]
pub struct Resource {
    node: Arc<ResourceNode>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

impl Resource {
    pub(crate) fn from_node(node: ResourceNode) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Returns `true` if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    /// The name this resource was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Dotted path from the client, e.g. `users.keys`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.node.qualified_name
    }

    /// The URL template this resource was registered with.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.node.url_template
    }

    /// The API base URL joined with this resource's template.
    ///
    /// Placeholders are left in place.
    #[must_use]
    pub fn url(&self) -> String {
        join_url(self.node.owner.api().as_ref(), &self.node.url_template)
    }

    /// The resource this one was registered under, or `None` for
    /// resources registered directly on the client.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node.parent.upgrade().map(|node| Self { node })
    }

    /// The client-level HTTP pipeline this resource dispatches through.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.node.owner
    }

    /// Registers a child resource beneath this one.
    ///
    /// The child's template is independent of this resource's template.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::ReservedName`] if `name` is a node method,
    /// [`RegisterError::EmptyName`] if it is empty,
    /// [`RegisterError::DottedName`] if it contains `.`, and
    /// [`RegisterError::AlreadyRegistered`] if `name` is already bound to a
    /// different template.
    pub fn register(&self, url_template: &str, name: &str) -> Result<Self, RegisterError> {
        self.node
            .children
            .register(&self.node.owner, Some(&self.node), url_template, name)
    }

    /// Returns the child registered under `name`.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<Self> {
        self.node.children.get(name)
    }

    /// Names of the children registered beneath this resource, sorted.
    #[must_use]
    pub fn resource_names(&self) -> Vec<String> {
        self.node.children.names()
    }

    /// Sends a GET request. Record data is encoded into the query string.
    ///
    /// Pass `()` to send no data.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be prepared or the
    /// transport fails. Non-2xx responses are returned as `Ok`.
    pub async fn read(&self, data: impl Into<Payload>) -> Result<HttpResponse, HttpError> {
        self.dispatch(HttpMethod::Get, data.into()).await
    }

    /// Sends a POST request with `data` as the body.
    ///
    /// # Errors
    ///
    /// See [`Resource::read`].
    pub async fn create(&self, data: impl Into<Payload>) -> Result<HttpResponse, HttpError> {
        self.dispatch(HttpMethod::Post, data.into()).await
    }

    /// Sends a PUT request with `data` as the body.
    ///
    /// # Errors
    ///
    /// See [`Resource::read`].
    pub async fn update(&self, data: impl Into<Payload>) -> Result<HttpResponse, HttpError> {
        self.dispatch(HttpMethod::Put, data.into()).await
    }

    /// Sends a DELETE request with `data` as the body.
    ///
    /// # Errors
    ///
    /// See [`Resource::read`].
    pub async fn remove(&self, data: impl Into<Payload>) -> Result<HttpResponse, HttpError> {
        self.dispatch(HttpMethod::Delete, data.into()).await
    }

    /// Placeholders in the template are resolved later, by the pipeline.
    async fn dispatch(&self, method: HttpMethod, data: Payload) -> Result<HttpResponse, HttpError> {
        let options = RequestOptions::builder(method, self.url()).data(data).build();
        self.node.owner.request(options).await
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.node.name)
            .field("qualified_name", &self.node.qualified_name)
            .field("url_template", &self.node.url_template)
            .field("children", &self.node.children.names())
            .finish()
    }
}
