//! HTTP client types and the shared request pipeline.
//!
//! # Overview
//!
//! - [`RestClient`]: the root of a resource tree
//! - [`HttpClient`]: the request pipeline every resource dispatches through
//! - [`RequestOptions`]: per-call options (URL template, data, headers, hooks)
//! - [`RequestParams`]: the mutable record `before_request` hooks receive
//! - [`PreparedRequest`]: a fully assembled request, as sent on the wire
//! - [`HttpResponse`]: a buffered response
//! - [`HttpMethod`], [`DataType`]: request method and payload encoding
//! - [`Payload`], [`Record`]: request payloads
//! - [`BeforeRequest`], [`AfterRequest`]: interception hooks
//! - [`HttpError`]: errors raised by the pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::clients::{HttpMethod, RequestOptions};
//! use serde_json::json;
//!
//! let options = RequestOptions::builder(HttpMethod::Post, "https://api.example.com/items")
//!     .data(json!({"name": "widget"}))
//!     .header("X-Request-Id", "abc")
//!     .build();
//!
//! let response = client.request(options).await?;
//! println!("{} {}", response.code, response.body);
//! ```
//!
//! # Error Behavior
//!
//! Transport failures resolve to [`HttpError::Network`] and are logged at
//! `error` level. Non-2xx responses are returned as `Ok`; inspect
//! [`HttpResponse::is_ok`]. No retries are performed.

mod errors;
mod hooks;
mod http_client;
mod http_request;
mod http_response;
pub(crate) mod payload;
pub mod rest;

pub use errors::HttpError;
pub use hooks::{AfterRequest, BeforeRequest};
pub use http_client::{HttpClient, PreparedRequest, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, RequestOptions, RequestOptionsBuilder, RequestParams};
pub use http_response::HttpResponse;
pub use payload::{to_query_string, Payload, Record};

// Re-export the tree root at the clients module level
pub use rest::RestClient;
