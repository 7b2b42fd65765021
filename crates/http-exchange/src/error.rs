//! Client-facing error types

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by [`HttpClient::exchange`](crate::HttpClient::exchange).
///
/// None of these are retried internally; every failure is handed to the
/// immediate caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request was cancelled through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,
    /// The server replied with a non-success status.
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },
    /// A body could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A transport failure, passed through unchanged.
    #[error(transparent)]
    Transport(TransportError),
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}
