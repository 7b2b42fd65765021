//! The outbound transport contract

use std::fmt::Debug;

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::cancel::CancelToken;

/// Expected HTTP transport.
///
/// Implementations must observe the request's cancellation token and
/// settle with [`TransportError::Aborted`] once it is cancelled, and
/// must read the full response body before resolving.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Performs one request/response round trip.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// A fully resolved request, ready for the wire.
#[derive(Debug)]
pub struct TransportRequest {
    /// Absolute URL string.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Resolved headers, or `None` to use the transport's defaults.
    pub headers: Option<HeaderMap>,
    /// Request body bytes.
    pub body: Option<Vec<u8>>,
    /// Cancellation token attached to this request.
    pub cancel: Option<CancelToken>,
}

/// A raw transport reply.
#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Full response body.
    pub body: Vec<u8>,
}

/// Transport failure vocabulary.
///
/// [`Aborted`](Self::Aborted) identifies a signal-triggered
/// cancellation; every other variant is propagated to callers
/// unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TransportError {
    /// The round trip was aborted through its cancellation token.
    #[error("transport call aborted")]
    Aborted,
    /// The composed URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connect(String),
    /// The backend reported a timeout.
    #[error("request timed out")]
    Timeout,
    /// Any other backend failure.
    #[error("{0}")]
    Other(String),
}

impl From<url::ParseError> for TransportError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_from_parse_error() {
        let error: TransportError = url::Url::parse("not a url")
            .expect_err("relative URL without a base")
            .into();

        assert!(matches!(error, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn aborted_display() {
        assert_eq!(TransportError::Aborted.to_string(), "transport call aborted");
    }
}
