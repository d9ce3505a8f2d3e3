//! Client configuration.
//!
//! # Overview
//!
//! - [`ClientConfig`]: shared settings for one client and its resource tree
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`ApiUrl`]: a validated API base URL
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ApiUrl, ClientConfig, DataType};
//!
//! let config = ClientConfig::builder()
//!     .api(ApiUrl::new("https://gitlab.com/api/v3").unwrap())
//!     .data_type(DataType::Json)
//!     .before_request(|params| params.data.insert("private_token", "secret"))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::ApiUrl;

use crate::clients::{AfterRequest, BeforeRequest, DataType, HttpResponse, RequestParams};
use crate::error::ConfigError;

/// Configuration shared by a client and every resource registered under it.
///
/// The configuration is immutable once built. Hooks set here apply to every
/// request unless a call supplies its own.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api: ApiUrl,
    data_type: DataType,
    before_request: Option<BeforeRequest>,
    after_request: Option<AfterRequest>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Returns the default payload encoding.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the client-level `before_request` hook, if configured.
    #[must_use]
    pub const fn before_request(&self) -> Option<&BeforeRequest> {
        self.before_request.as_ref()
    }

    /// Returns the client-level `after_request` hook, if configured.
    #[must_use]
    pub const fn after_request(&self) -> Option<&AfterRequest> {
        self.after_request.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `api` is required.
///
/// # Defaults
///
/// - `data_type`: [`DataType::Json`]
/// - `before_request`: `None`
/// - `after_request`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api: Option<ApiUrl>,
    data_type: Option<DataType>,
    before_request: Option<BeforeRequest>,
    after_request: Option<AfterRequest>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn api(mut self, api: ApiUrl) -> Self {
        self.api = Some(api);
        self
    }

    /// Sets the default payload encoding.
    #[must_use]
    pub const fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Sets the hook run on every request's parameters before dispatch.
    #[must_use]
    pub fn before_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut RequestParams) + Send + Sync + 'static,
    {
        self.before_request = Some(BeforeRequest::new(hook));
        self
    }

    /// Sets the hook run on every buffered response.
    #[must_use]
    pub fn after_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpResponse) -> Option<HttpResponse> + Send + Sync + 'static,
    {
        self.after_request = Some(AfterRequest::new(hook));
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api = self
            .api
            .ok_or(ConfigError::MissingRequiredField { field: "api" })?;

        Ok(ClientConfig {
            api,
            data_type: self.data_type.unwrap_or_default(),
            before_request: self.before_request,
            after_request: self.after_request,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
