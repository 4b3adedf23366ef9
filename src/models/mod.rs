//! Request and Response models for the proxy API
//!
//! Key extraction from request paths and the JSON bodies written back.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{value_from_body, ProxyKey};
pub use responses::{ErrorResponse, KeyValueResponse};
