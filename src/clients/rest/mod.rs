//! The resource-tree root client.
//!
//! [`RestClient`] is the entry point: build it from a
//! [`ClientConfig`](crate::ClientConfig), register resources on it and call
//! CRUD methods on the returned [`Resource`](crate::rest::Resource) handles.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{ApiUrl, ClientConfig, RestClient};
//! use serde_json::json;
//!
//! let gitlab = RestClient::new(
//!     ClientConfig::builder()
//!         .api(ApiUrl::new("https://gitlab.com/api/v3")?)
//!         .before_request(|params| params.data.insert("private_token", "your-token"))
//!         .build()?,
//! );
//!
//! gitlab.register("/user", "user")?;
//! let users = gitlab.register("/users/:id", "users")?;
//! users.register("/users/:uid/keys", "keys")?;
//!
//! let keys = gitlab.lookup("users.keys").unwrap();
//! let response = keys.read(json!({"uid": 1596})).await?;
//! println!("{} {}", response.body, response.code);
//! ```

mod client;

pub use client::RestClient;
