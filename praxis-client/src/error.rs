//! Error types for the client crate.

use std::time::Duration;

/// Errors that can occur while talking to a CPF provider.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The base URL cannot be parsed or uses an unsupported scheme.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    /// The TCP connection to the provider could not be established.
    #[error("connect failed: {0}")]
    Connect(String),

    /// HTTP handshake, request or body transfer failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider did not answer within the configured timeout.
    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The JSON response lacks a boolean verdict under the expected key.
    #[error("response has no boolean '{key}' field")]
    MissingVerdict { key: &'static str },
}
