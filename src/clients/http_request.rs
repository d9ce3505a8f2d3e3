//! HTTP request types.
//!
//! This module provides the per-call [`RequestOptions`] (and its builder)
//! handed to [`HttpClient::request`](crate::clients::HttpClient::request),
//! plus the mutable [`RequestParams`] record that `before_request` hooks see.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clients::hooks::{AfterRequest, BeforeRequest};
use crate::clients::payload::Payload;
use crate::clients::HttpResponse;
use crate::error::ConfigError;

/// HTTP methods supported by the request pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP HEAD method, a body-less GET.
    Head,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method token sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for GET and HEAD.
    ///
    /// Read actions never carry a body; structured payloads are encoded
    /// into the query string instead.
    #[must_use]
    pub const fn is_read_action(&self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Payload encoding for requests and responses.
///
/// With [`DataType::Json`] every request advertises `Accept: application/json`.
/// [`DataType::Raw`] leaves content negotiation to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// JSON encoding (`application/json`).
    #[default]
    Json,
    /// Raw strings, no `Accept` header is added.
    Raw,
}

impl DataType {
    /// Returns the MIME type advertised for this data type, if any.
    #[must_use]
    pub const fn as_accept(&self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Raw => None,
        }
    }
}

impl FromStr for DataType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "raw" => Ok(Self::Raw),
            _ => Err(ConfigError::InvalidDataType {
                value: s.to_string(),
            }),
        }
    }
}

/// Options for a single call through the request pipeline.
///
/// `url` may still contain `:placeholder` tokens; they are resolved against
/// `data` when the request is prepared. Use [`RequestOptions::builder`].
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::{HttpMethod, RequestOptions};
/// use serde_json::json;
///
/// let options = RequestOptions::builder(HttpMethod::Get, "https://api.example.com/users/:id")
///     .data(json!({"id": 7}))
///     .header("X-Trace", "abc")
///     .build();
///
/// assert_eq!(options.method, HttpMethod::Get);
/// ```
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Absolute URL template.
    pub url: String,
    /// Record used for placeholder substitution and, unless `content` is
    /// set, as the transmitted payload.
    pub data: Payload,
    /// Payload sent instead of `data` when present.
    pub content: Option<Payload>,
    /// Headers set before defaults are applied.
    pub headers: HashMap<String, String>,
    /// Basic auth credentials as `user:password`.
    pub auth: Option<String>,
    /// Overrides the client's payload encoding for this call.
    pub data_type: Option<DataType>,
    /// Overrides the client's `before_request` hook for this call.
    pub before_request: Option<BeforeRequest>,
    /// Overrides the client's `after_request` hook for this call.
    pub after_request: Option<AfterRequest>,
}

impl RequestOptions {
    /// Creates a new builder for the given method and URL template.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> RequestOptionsBuilder {
        RequestOptionsBuilder::new(method, url)
    }
}

/// Builder for [`RequestOptions`].
#[derive(Debug)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            options: RequestOptions {
                method,
                url: url.into(),
                data: Payload::Empty,
                content: None,
                headers: HashMap::new(),
                auth: None,
                data_type: None,
                before_request: None,
                after_request: None,
            },
        }
    }

    /// Sets the data record.
    #[must_use]
    pub fn data(mut self, data: impl Into<Payload>) -> Self {
        self.options.data = data.into();
        self
    }

    /// Sets a body that replaces `data` as the transmitted payload.
    #[must_use]
    pub fn content(mut self, content: impl Into<Payload>) -> Self {
        self.options.content = Some(content.into());
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.options.headers = headers;
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(key.into(), value.into());
        self
    }

    /// Sets basic auth credentials (`user:password`).
    #[must_use]
    pub fn auth(mut self, credentials: impl Into<String>) -> Self {
        self.options.auth = Some(credentials.into());
        self
    }

    /// Overrides the payload encoding.
    #[must_use]
    pub const fn data_type(mut self, data_type: DataType) -> Self {
        self.options.data_type = Some(data_type);
        self
    }

    /// Overrides the `before_request` hook.
    #[must_use]
    pub fn before_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut RequestParams) + Send + Sync + 'static,
    {
        self.options.before_request = Some(BeforeRequest::new(hook));
        self
    }

    /// Overrides the `after_request` hook.
    #[must_use]
    pub fn after_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpResponse) -> Option<HttpResponse> + Send + Sync + 'static,
    {
        self.options.after_request = Some(AfterRequest::new(hook));
        self
    }

    /// Builds the [`RequestOptions`].
    #[must_use]
    pub fn build(self) -> RequestOptions {
        self.options
    }
}

/// The mutable parameter record assembled for one request.
///
/// `before_request` hooks receive this by `&mut` and may rewrite any field:
/// add headers, inject fields into `data`, or even redirect `host`/`path`.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestParams {
    /// `http` or `https`.
    pub scheme: String,
    /// Target host name.
    pub host: String,
    /// Target port (defaults to 80/443 by scheme).
    pub port: u16,
    /// Path including any query string.
    pub path: String,
    /// The HTTP method.
    pub method: HttpMethod,
    /// Outgoing headers.
    pub headers: HashMap<String, String>,
    /// The payload to transmit.
    pub data: Payload,
}

impl RequestParams {
    /// Looks up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the absolute URL these parameters point at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}
