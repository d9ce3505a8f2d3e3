//! The root of a resource tree.
//!
//! This module provides the [`RestClient`] type: it owns the shared
//! [`HttpClient`] and the top-level resource registry.

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, HttpResponse, RequestOptions};
use crate::config::ClientConfig;
use crate::rest::registry::Registry;
use crate::rest::{RegisterError, Resource};

/// The root of a declarative REST resource tree.
///
/// Register resources by URL template and name, then call `read`,
/// `create`, `update` or `remove` on them. Every request from every node
/// in the tree goes through this client's [`HttpClient`].
///
/// Cloning a `RestClient` is cheap and yields a handle to the same tree.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use rest_resource::{ApiUrl, ClientConfig, RestClient};
/// use serde_json::json;
///
/// let client = RestClient::new(
///     ClientConfig::builder()
///         .api(ApiUrl::new("https://api.example.com")?)
///         .build()?,
/// );
///
/// let items = client.register("/items/:id", "items")?;
///
/// // GET https://api.example.com/items/42?id=42
/// let response = items.read(json!({"id": 42})).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    /// The shared request pipeline.
    http_client: Arc<HttpClient>,
    /// Resources registered directly on the client.
    resources: Arc<Registry>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new client with an empty resource tree.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created; see
    /// [`HttpClient::new`].
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        tracing::debug!("Creating REST client for {}", config.api());

        Self {
            http_client: Arc::new(HttpClient::new(config)),
            resources: Arc::new(Registry::new()),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.http_client.config()
    }

    /// Returns the shared request pipeline.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Registers a top-level resource.
    ///
    /// Registering the same name with the same template again returns the
    /// existing resource.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::ReservedName`] if `name` is one of
    /// [`RESERVED_NAMES`](crate::rest::RESERVED_NAMES),
    /// [`RegisterError::EmptyName`] if it is empty,
    /// [`RegisterError::DottedName`] if it contains `.`, and
    /// [`RegisterError::AlreadyRegistered`] if `name` is bound to a
    /// different template.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_resource::{ApiUrl, ClientConfig, RestClient};
    ///
    /// let client = RestClient::new(
    ///     ClientConfig::builder()
    ///         .api(ApiUrl::new("https://gitlab.com/api/v3").unwrap())
    ///         .build()
    ///         .unwrap(),
    /// );
    ///
    /// let users = client.register("/users/:id", "users").unwrap();
    /// users.register("/users/:uid/keys", "keys").unwrap();
    ///
    /// let keys = client.lookup("users.keys").unwrap();
    /// assert_eq!(keys.url(), "https://gitlab.com/api/v3/users/:uid/keys");
    /// ```
    pub fn register(&self, url_template: &str, name: &str) -> Result<Resource, RegisterError> {
        self.resources
            .register(&self.http_client, None, url_template, name)
    }

    /// Returns the top-level resource registered under `name`.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<Resource> {
        self.resources.get(name)
    }

    /// Resolves a dotted path such as `users.keys` to a resource.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<Resource> {
        let mut segments = path.split('.');
        let first = self.resource(segments.next()?)?;
        segments.try_fold(first, |node, name| node.resource(name))
    }

    /// Names of the top-level resources, sorted.
    #[must_use]
    pub fn resource_names(&self) -> Vec<String> {
        self.resources.names()
    }

    /// Sends a request through the shared pipeline.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn request(&self, options: RequestOptions) -> Result<HttpResponse, HttpError> {
        self.http_client.request(options).await
    }
}
