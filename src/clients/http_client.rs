//! The shared request pipeline.
//!
//! Every CRUD call on every resource funnels through [`HttpClient::request`].
//! The pipeline resolves placeholders, selects the transport by scheme,
//! applies default headers, runs the `before_request` hook, encodes the
//! payload (query string for read actions, JSON otherwise), sends the
//! request, buffers the response body and finally runs `after_request`.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, RequestOptions, RequestParams};
use crate::clients::http_response::HttpResponse;
use crate::clients::payload::{to_query_string, Payload};
use crate::config::{ApiUrl, ClientConfig};
use crate::rest::resolve_url;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A request after placeholder resolution, hooks and payload encoding.
///
/// This is exactly what goes on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// `http` or `https`.
    pub scheme: String,
    /// Target host name.
    pub host: String,
    /// Target port.
    pub port: u16,
    /// Path including any query string.
    pub path: String,
    /// Final request headers.
    pub headers: HashMap<String, String>,
    /// Encoded body, if any.
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Returns the absolute URL of this request.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }

    /// Looks up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// HTTP client shared by a [`RestClient`](crate::RestClient) and all of its
/// resources.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; concurrent requests are independent.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Shared configuration.
    config: ClientConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}rest-resource-api v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            default_headers,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api(&self) -> &ApiUrl {
        self.config.api()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Assembles the request described by `options` without sending it.
    ///
    /// Runs placeholder resolution, scheme and port selection, header
    /// defaulting, the `before_request` hook and payload encoding.
    ///
    /// Substitution itself is textual, but the resolved URL is then parsed as
    /// a WHATWG URL, which is also how it goes out on the wire. Dot segments
    /// introduced by substituted values are collapsed (`/files/../meta`
    /// becomes `/meta`) and characters not allowed in a path are
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnsupportedProtocol`] for schemes other than
    /// `http`/`https`, [`HttpError::InvalidUrl`] if the resolved URL does not
    /// parse, and [`HttpError::Serialization`] if a record cannot be encoded.
    pub fn prepare(&self, options: &RequestOptions) -> Result<PreparedRequest, HttpError> {
        let resolved = resolve_url(&options.url, &options.data);
        let url = reqwest::Url::parse(&resolved).map_err(|e| HttpError::InvalidUrl {
            url: resolved.clone(),
            reason: e.to_string(),
        })?;

        let default_port = match url.scheme() {
            "http" => 80,
            "https" => 443,
            other => {
                return Err(HttpError::UnsupportedProtocol {
                    protocol: other.to_string(),
                })
            }
        };

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        // Merge headers: defaults, then caller-supplied
        let mut headers = self.default_headers.clone();
        for (key, value) in &options.headers {
            headers.insert(key.clone(), value.clone());
        }

        let data_type = options.data_type.unwrap_or_else(|| self.config.data_type());
        if let Some(accept) = data_type.as_accept() {
            headers.retain(|key, _| !key.eq_ignore_ascii_case("Accept"));
            headers.insert("Accept".to_string(), accept.to_string());
        }

        let credentials = options.auth.clone().or_else(|| userinfo(&url));
        if let Some(credentials) = credentials {
            if find_header(&headers, "Authorization").is_none() {
                headers.insert(
                    "Authorization".to_string(),
                    format!("Basic {}", BASE64.encode(credentials)),
                );
            }
        }

        let mut params = RequestParams {
            scheme: url.scheme().to_string(),
            host: url.host_str().unwrap_or("localhost").to_string(),
            port: url.port().unwrap_or(default_port),
            path,
            method: options.method,
            headers,
            data: options.content.clone().unwrap_or_else(|| options.data.clone()),
        };

        let before_request = options
            .before_request
            .as_ref()
            .or_else(|| self.config.before_request());
        if let Some(hook) = before_request {
            hook.call(&mut params);
        }

        let RequestParams {
            scheme,
            host,
            port,
            mut path,
            method,
            mut headers,
            data,
        } = params;

        let body = match data {
            data if data.is_empty() => None,
            Payload::Record(record) if method.is_read_action() => {
                let query = to_query_string(&record);
                if !query.is_empty() {
                    path.push(if path.contains('?') { '&' } else { '?' });
                    path.push_str(&query);
                }
                None
            }
            Payload::Record(record) => {
                if find_header(&headers, "Content-Type").is_none() {
                    headers.insert("Content-Type".to_string(), "application/json".to_string());
                }
                Some(serde_json::to_vec(&record)?)
            }
            Payload::Text(text) => Some(text.into_bytes()),
            Payload::Binary(bytes) => Some(bytes),
            Payload::Empty => None,
        };

        if let Some(body) = &body {
            headers.insert("Content-Length".to_string(), body.len().to_string());
        }

        Ok(PreparedRequest {
            method,
            scheme,
            host,
            port,
            path,
            headers,
            body,
        })
    }

    /// Sends a request through the pipeline and buffers the response.
    ///
    /// The `after_request` hook (call-level, else client-level) may replace
    /// the response before it is returned.
    ///
    /// # Errors
    ///
    /// Returns any error from [`HttpClient::prepare`], plus
    /// [`HttpError::InvalidHeader`] for headers that cannot be sent and
    /// [`HttpError::Network`] when the transport fails. Non-2xx responses
    /// are not errors.
    pub async fn request(&self, options: RequestOptions) -> Result<HttpResponse, HttpError> {
        let prepared = self.prepare(&options)?;
        let url = prepared.url();

        tracing::debug!("{} {}", prepared.method, url);

        let mut req_builder = self.client.request(prepared.method.into(), &url);
        for (key, value) in &prepared.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| HttpError::InvalidHeader { name: key.clone() })?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeader { name: key.clone() })?;
            req_builder = req_builder.header(name, value);
        }
        if let Some(body) = prepared.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await.map_err(|e| {
            tracing::error!("problem with request: {}", e);
            HttpError::Network(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await.map_err(|e| {
            tracing::error!("problem with response from {}: {}", url, e);
            HttpError::Network(e)
        })?;

        let response = HttpResponse::new(code, res_headers, body);

        let after_request = options
            .after_request
            .as_ref()
            .or_else(|| self.config.after_request());
        Ok(match after_request {
            Some(hook) => hook.apply(response),
            None => response,
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Credentials embedded in the URL as `user:password@`.
fn userinfo(url: &reqwest::Url) -> Option<String> {
    if url.username().is_empty() && url.password().is_none() {
        return None;
    }
    let username = urlencoding::decode(url.username()).ok()?;
    let password = url
        .password()
        .map(urlencoding::decode)
        .transpose()
        .ok()?
        .unwrap_or_default();
    Some(format!("{username}:{password}"))
}
