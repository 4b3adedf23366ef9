//! Request models for the proxy API
//!
//! The proxy has no JSON request bodies: the key comes from the path and a
//! PUT body is the raw value.

use crate::error::{ProxyError, Result};

/// A cache key extracted from a request path.
///
/// The key is the last non-empty path segment, so `/a/b` addresses `b` and a
/// trailing slash is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyKey(String);

impl ProxyKey {
    /// Extracts the key from a (decoded) request path.
    ///
    /// Returns `InvalidRequest` when the path has no non-empty segment.
    pub fn from_path(path: &str) -> Result<Self> {
        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(|segment| Self(segment.to_string()))
            .ok_or_else(|| ProxyError::InvalidRequest("Request path has no key".to_string()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned key.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Decodes a PUT body into the value to store.
///
/// Values are stored as strings, so a body that is not valid UTF-8 counts as
/// unreadable.
pub fn value_from_body(body: &[u8]) -> Result<String> {
    String::from_utf8(body.to_vec())
        .map_err(|e| ProxyError::InvalidRequest(format!("Body is not valid UTF-8: {}", e)))
}
