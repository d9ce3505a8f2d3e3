//! Resource tree infrastructure.
//!
//! This module provides the pieces that turn a flat list of URL templates
//! into an addressable tree:
//!
//! - [`Resource`]: a registered node with `read`/`create`/`update`/`remove`
//! - [`RegisterError`]: naming conflicts raised by `register`
//! - [`resolve_template`], [`resolve_url`], [`join_url`], [`placeholders`]:
//!   URL template helpers
//! - [`RESERVED_NAMES`]: names a resource may not take
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ApiUrl, ClientConfig, RestClient};
//! use rest_resource::rest::{RegisterError, Resource};
//!
//! let client = RestClient::new(
//!     ClientConfig::builder()
//!         .api(ApiUrl::new("https://api.example.com").unwrap())
//!         .build()
//!         .unwrap(),
//! );
//!
//! let items = client.register("/items/:id", "items").unwrap();
//! let again = client.register("/items/:id", "items").unwrap();
//! assert!(Resource::ptr_eq(&items, &again));
//!
//! assert!(matches!(
//!     client.register("/other", "items"),
//!     Err(RegisterError::AlreadyRegistered { .. })
//! ));
//! ```

mod errors;
mod path;
pub(crate) mod registry;
mod resource;

pub use errors::RegisterError;
pub use path::{join_url, placeholders, resolve_template, resolve_url};
pub use registry::{is_reserved, RESERVED_NAMES};
pub use resource::Resource;
