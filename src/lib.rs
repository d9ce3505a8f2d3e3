//! # REST Resource API
//!
//! A declarative REST client builder. Describe a tree of remote resources by
//! URL template and name, and every node in the tree gets uniform
//! `read`/`create`/`update`/`remove` methods that turn into HTTP requests
//! against a configured API base URL.
//!
//! ## Overview
//!
//! This crate provides:
//! - Client configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - A resource tree rooted at [`RestClient`], built with `register`
//! - URL templates with `:placeholder` tokens resolved from call data
//! - A single async request pipeline shared by every node, with
//!   `before_request`/`after_request` interception hooks
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_resource::{ApiUrl, ClientConfig, RestClient};
//!
//! let client = RestClient::new(
//!     ClientConfig::builder()
//!         .api(ApiUrl::new("https://gitlab.com/api/v3").unwrap())
//!         .before_request(|params| params.data.insert("private_token", "your-token"))
//!         .build()
//!         .unwrap(),
//! );
//!
//! // client.user
//! client.register("/user", "user").unwrap();
//! // client.users
//! let users = client.register("/users/:id", "users").unwrap();
//! // client.users.keys
//! users.register("/users/:uid/keys", "keys").unwrap();
//!
//! assert!(client.lookup("users.keys").is_some());
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let keys = client.lookup("users.keys").unwrap();
//! let response = keys.read(json!({"uid": 1596})).await?;
//! println!("{} {}", response.body, response.code);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: configuration and registration errors surface immediately
//! - **Thread-safe**: clients and resources are `Send + Sync` and cheap to clone
//! - **Async-first**: requests are futures driven by the Tokio runtime
//! - **Explicit failures**: transport errors are returned, never swallowed

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiUrl, ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    AfterRequest, BeforeRequest, DataType, HttpClient, HttpError, HttpMethod, HttpResponse,
    Payload, PreparedRequest, Record, RequestOptions, RequestOptionsBuilder, RequestParams,
    RestClient,
};

// Re-export resource tree types
pub use rest::{RegisterError, Resource};
