//! Registration error types.
//!
//! Registration fails synchronously, before any request is made. All
//! variants are recoverable by choosing a different name.

use thiserror::Error;

/// Error returned by `register` on a client or resource.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::RegisterError;
///
/// let error = RegisterError::ReservedName { name: "read".to_string() };
/// assert!(error.to_string().contains("reserved"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The resource name is empty.
    #[error("resource name cannot be empty")]
    EmptyName,

    /// The name contains `.`, which separates segments in dotted lookups.
    #[error("resource name \"{name}\" must not contain '.'")]
    DottedName {
        /// The rejected name.
        name: String,
    },

    /// The name collides with one of the node methods.
    #[error("resource \"{name}\" is reserved word, please use another name")]
    ReservedName {
        /// The rejected name.
        name: String,
    },

    /// The name is already bound to a different URL template.
    #[error(
        "resource \"{name}\" has been registered with template \"{existing}\" \
         (requested \"{requested}\")"
    )]
    AlreadyRegistered {
        /// The conflicting name.
        name: String,
        /// The template already bound to `name`.
        existing: String,
        /// The template passed to this call.
        requested: String,
    },
}
