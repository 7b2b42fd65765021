//! reqwest-based transport implementation

use async_trait::async_trait;
use url::Url;

use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// The default [`Transport`], backed by [`reqwest`].
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with default reqwest settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates a transport from a preconfigured reqwest client.
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn perform(
        builder: reqwest::RequestBuilder,
    ) -> Result<TransportResponse, TransportError> {
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::trace!("got {status} response");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(&request.url)?;

        tracing::trace!("sending {} request to {url}", request.method);

        let mut builder = self.client.request(request.method, url);

        if let Some(headers) = request.headers {
            builder = builder.headers(headers);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let call = Self::perform(builder);

        match request.cancel {
            Some(token) => tokio::select! {
                biased;

                () = token.cancelled() => Err(TransportError::Aborted),
                result = call => result,
            },
            None => call.await,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}
