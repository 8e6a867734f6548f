//! Error types for the student API client.
//!
//! # Design
//! The two failure kinds the controller distinguishes are transport failures
//! (`Network`) and non-2xx answers (`Server`). A 404 is a `Server` error like
//! any other; `is_not_found` exists for callers that care. Codec failures get
//! their own variants so they are not mistaken for server faults.

use thiserror::Error;

/// Errors returned by the client, transport and gateway layers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}
