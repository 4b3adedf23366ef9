//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Response body for a successful GET or PUT: a single-member object
/// `{"<key>": "<value>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl KeyValueResponse {
    /// Creates a new KeyValueResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Serialize for KeyValueResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
