//! Error types for client configuration.
//!
//! This module contains the error type returned while building a
//! [`ClientConfig`](crate::ClientConfig) or parsing configuration values.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL cannot be empty.
    #[error("API base URL cannot be empty. Please provide the root URL of the remote API.")]
    EmptyApiUrl,

    /// The API base URL could not be parsed.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com/v1').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The payload encoding name is not recognized.
    #[error("Invalid data type '{value}'. Expected 'json' or 'raw'.")]
    InvalidDataType {
        /// The unrecognized value.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
