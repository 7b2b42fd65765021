//! Canned-response transports for unit tests

use std::collections::HashMap;

use async_trait::async_trait;

use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// Transport resolving requests from a URL-keyed result table.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    results: HashMap<String, Result<TransportResponse, TransportError>>,
}

impl StubTransport {
    pub(crate) fn new(
        results: impl IntoIterator<Item = (String, Result<TransportResponse, TransportError>)>,
    ) -> Self {
        Self {
            results: results.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        if let Some(token) = &request.cancel {
            if token.is_cancelled() {
                return Err(TransportError::Aborted);
            }
        }

        self.results.get(&request.url).cloned().unwrap_or_else(|| {
            Err(TransportError::Other(format!(
                "no stub result for {}",
                request.url
            )))
        })
    }
}

/// Transport that never settles until its request is cancelled.
#[derive(Debug, Default)]
pub(crate) struct PendingTransport;

#[async_trait]
impl Transport for PendingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        match request.cancel {
            Some(token) => {
                token.cancelled().await;
                Err(TransportError::Aborted)
            }
            None => std::future::pending().await,
        }
    }
}
