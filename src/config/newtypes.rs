//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API base URL.
///
/// Every resolved resource path is appended to this URL. Construction only
/// checks the URL's shape (a scheme followed by `://` and a non-empty host);
/// whether the scheme is actually supported is decided when a request is made.
///
/// # Example
///
/// ```rust
/// use rest_resource::ApiUrl;
///
/// let url = ApiUrl::new("https://gitlab.com/api/v3").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "gitlab.com");
/// assert_eq!(url.as_ref(), "https://gitlab.com/api/v3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// Creates a new validated API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiUrl`] if the URL is blank, or
    /// [`ConfigError::InvalidApiUrl`] if it has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidApiUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let authority_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        // Skip userinfo, then stop at the port separator
        let host_start = url[host_start..authority_end]
            .rfind('@')
            .map_or(host_start, |i| host_start + i + 1);
        let host = &url[host_start..authority_end];
        let host_end = if host.starts_with('[') {
            // IPv6 literal, keep the brackets
            host.find(']')
                .map(|i| host_start + i + 1)
                .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?
        } else {
            host.find(':').map_or(authority_end, |i| host_start + i)
        };

        if host_start >= host_end {
            return Err(ConfigError::InvalidApiUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
