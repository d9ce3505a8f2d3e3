//! Request interception hooks.
//!
//! Hooks can be set on [`ClientConfig`](crate::ClientConfig) and overridden
//! per call on [`RequestOptions`](crate::clients::RequestOptions). The call-level
//! hook wins when both are present.

use std::fmt;
use std::sync::Arc;

use crate::clients::{HttpResponse, RequestParams};

/// Runs before dispatch with the full mutable parameter record.
///
/// This is the extension point for authentication, request signing, or
/// logging. Mutations to `data` are reflected in the transmitted body or
/// query string.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::BeforeRequest;
///
/// let hook = BeforeRequest::new(|params| {
///     params.data.insert("private_token", "secret");
/// });
/// ```
#[derive(Clone)]
pub struct BeforeRequest(Arc<dyn Fn(&mut RequestParams) + Send + Sync>);

impl BeforeRequest {
    /// Wraps a closure as a hook.
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&mut RequestParams) + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    /// Invokes the hook.
    pub fn call(&self, params: &mut RequestParams) {
        (self.0)(params);
    }
}

impl fmt::Debug for BeforeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeRequest(<fn>)")
    }
}

/// Runs once the response body has been buffered.
///
/// Returning `Some` replaces the response handed back to the caller;
/// `None` keeps the pipeline's own response.
#[derive(Clone)]
pub struct AfterRequest(Arc<dyn Fn(&HttpResponse) -> Option<HttpResponse> + Send + Sync>);

impl AfterRequest {
    /// Wraps a closure as a hook.
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&HttpResponse) -> Option<HttpResponse> + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    /// Invokes the hook, falling back to `response` when it declines.
    #[must_use]
    pub fn apply(&self, response: HttpResponse) -> HttpResponse {
        (self.0)(&response).unwrap_or(response)
    }
}

impl fmt::Debug for AfterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AfterRequest(<fn>)")
    }
}
