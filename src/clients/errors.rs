//! HTTP-specific error types.
//!
//! # Error Handling
//!
//! - [`HttpError::UnsupportedProtocol`]: the URL's scheme is not `http`/`https`;
//!   raised while preparing the request, before any network activity
//! - [`HttpError::InvalidUrl`]: the resolved URL could not be parsed
//! - [`HttpError::InvalidHeader`]: a header name or value cannot be sent
//! - [`HttpError::Serialization`]: a record could not be encoded as JSON
//! - [`HttpError::Network`]: the transport failed (DNS, refused connection,
//!   broken stream)
//!
//! Non-2xx responses are not errors. They come back as `Ok` and the caller
//! inspects [`HttpResponse::code`](crate::clients::HttpResponse::code).
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::clients::HttpError;
//!
//! match users.read(()).await {
//!     Ok(response) => println!("{}: {}", response.code, response.body),
//!     Err(HttpError::UnsupportedProtocol { protocol }) => {
//!         println!("cannot talk to {protocol}");
//!     }
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Unified error type for the request pipeline.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The URL scheme is neither `http` nor `https`.
    #[error("Protocol {protocol}: is not supported")]
    UnsupportedProtocol {
        /// The rejected scheme.
        protocol: String,
    },

    /// The resolved URL could not be parsed.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL after placeholder substitution.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A header name or value is not valid on the wire.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The payload could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
