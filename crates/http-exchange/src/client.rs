//! The exchange client

use std::fmt::{self, Debug, Formatter};

use http::HeaderMap;
use serde::de::DeserializeOwned;

use crate::backends::ReqwestTransport;
use crate::cancel::{cancel_pair, Cancel, CancelToken};
use crate::compose::{final_error, final_headers, final_url};
use crate::error::HttpError;
use crate::interceptor::{InterceptorHandle, Interceptors};
use crate::request::RequestConfig;
use crate::response::Response;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Executes [`RequestConfig`] descriptions over an injected
/// [`Transport`].
///
/// The client-level defaults (base URL, headers) and the transport are
/// fixed at construction; see [`HttpClientBuilder`].
pub struct HttpClient {
    base_url: Option<String>,
    headers: Option<HeaderMap>,
    transport: Box<dyn Transport>,
    interceptors: Interceptors,
}

impl HttpClient {
    /// Creates a client with no defaults, backed by reqwest.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a client builder.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Performs one request/response round trip.
    ///
    /// The reply body is deserialized from JSON into `T` and returned
    /// together with the transport metadata. Non-success statuses
    /// become [`HttpError::Status`]; a cancelled request becomes
    /// [`HttpError::Cancelled`]; any other transport failure passes
    /// through unchanged.
    pub async fn exchange<T>(&self, config: RequestConfig) -> Result<Response<T>, HttpError>
    where
        T: DeserializeOwned,
    {
        let config = self.interceptors.apply_request(config);
        let request = self.to_transport_request(config);

        let outcome = self.transport.send(request).await.map_err(final_error);
        let response = self.interceptors.apply_response(outcome)?;

        if !response.status.is_success() {
            return Err(HttpError::Status {
                status: response.status.as_u16(),
                message: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let data = serde_json::from_slice(&response.body)?;

        Ok(Response::new(response.status, response.headers, data))
    }

    /// Allocates a cancellation pair for a future request.
    ///
    /// Attach the token with [`RequestConfig::set_cancel_token`];
    /// invoking [`Cancel::cancel`] makes that request settle as
    /// [`HttpError::Cancelled`] instead of hanging.
    pub fn create_cancel_token(&self) -> (CancelToken, Cancel) {
        cancel_pair()
    }

    /// Registers a transform applied to every outgoing request, in
    /// registration order.
    ///
    /// The returned handle deregisters it through
    /// [`remove_interceptor`](Self::remove_interceptor).
    pub fn add_request_interceptor(
        &self,
        interceptor: impl Fn(RequestConfig) -> RequestConfig + Send + Sync + 'static,
    ) -> InterceptorHandle {
        self.interceptors.add_request(Box::new(interceptor))
    }

    /// Registers a transform applied to every settled transport
    /// outcome, in registration order.
    ///
    /// The returned handle deregisters it through
    /// [`remove_interceptor`](Self::remove_interceptor).
    pub fn add_response_interceptor(
        &self,
        interceptor: impl Fn(Result<TransportResponse, HttpError>) -> Result<TransportResponse, HttpError>
            + Send
            + Sync
            + 'static,
    ) -> InterceptorHandle {
        self.interceptors.add_response(Box::new(interceptor))
    }

    /// Deregisters the interceptor behind `handle`.
    pub fn remove_interceptor(&self, handle: InterceptorHandle) {
        self.interceptors.remove(handle);
    }

    fn to_transport_request(&self, config: RequestConfig) -> TransportRequest {
        TransportRequest {
            url: final_url(
                config.base_url.as_deref(),
                config.url.as_deref(),
                self.base_url.as_deref(),
            ),
            method: config.method,
            headers: final_headers(self.headers.as_ref(), config.headers, config.auth.as_ref()),
            body: config.body,
            cancel: config.cancel,
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for HttpClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// Configures and builds an [`HttpClient`].
#[derive(Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    headers: Option<HeaderMap>,
    transport: Option<Box<dyn Transport>>,
}

impl HttpClientBuilder {
    /// Sets the default base URL prepended to request paths.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the default headers merged under request-level ones.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Injects the transport performing the actual network I/O.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Builds the client, defaulting to [`ReqwestTransport`].
    pub fn build(self) -> HttpClient {
        HttpClient {
            base_url: self.base_url,
            headers: self.headers,
            transport: self
                .transport
                .unwrap_or_else(|| Box::new(ReqwestTransport::new())),
            interceptors: Interceptors::default(),
        }
    }
}

impl Debug for HttpClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use http::header::USER_AGENT;
    use http::{HeaderValue, StatusCode};
    use serde::Deserialize;
    use serde_json::Value;

    use super::*;
    use crate::backends::{PendingTransport, StubTransport};
    use crate::transport::TransportError;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        name: String,
    }

    fn json_response(body: &str) -> TransportResponse {
        TransportResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn client_with(transport: impl Transport + 'static) -> HttpClient {
        HttpClient::builder()
            .base_url("https://api.example.com")
            .transport(transport)
            .build()
    }

    #[test]
    fn build_client_with_defaults() {
        HttpClient::builder()
            .base_url("https://api.example.com")
            .default_headers(HeaderMap::from_iter([(
                USER_AGENT,
                HeaderValue::from_static("http-exchange"),
            )]))
            .build();
    }

    #[tokio::test]
    async fn exchange_returns_parsed_body() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Ok(json_response(r#"{"name": "alice"}"#)),
        )]));

        let response: Response<User> = client
            .exchange(RequestConfig::get("/users/1"))
            .await
            .expect("successful exchange");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.into_data(), User { name: "alice".into() });
    }

    #[tokio::test]
    async fn exchange_rejects_non_success_status() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Ok(TransportResponse {
                status: StatusCode::NOT_FOUND,
                headers: HeaderMap::new(),
                body: b"no such user".to_vec(),
            }),
        )]));

        let error = client
            .exchange::<Value>(RequestConfig::get("/users/1"))
            .await
            .expect_err("status error");

        assert!(matches!(
            error,
            HttpError::Status { status: 404, ref message } if message == "no such user"
        ));
    }

    #[tokio::test]
    async fn exchange_translates_abort() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Err(TransportError::Aborted),
        )]));

        let error = client
            .exchange::<Value>(RequestConfig::get("/users/1"))
            .await
            .expect_err("aborted");

        assert!(matches!(error, HttpError::Cancelled));
        assert_eq!(error.to_string(), "Request cancelled");
    }

    #[tokio::test]
    async fn exchange_passes_other_errors_through() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Err(TransportError::Connect("refused".into())),
        )]));

        let error = client
            .exchange::<Value>(RequestConfig::get("/users/1"))
            .await
            .expect_err("transport error");

        assert!(matches!(
            error,
            HttpError::Transport(TransportError::Connect(ref message)) if message == "refused"
        ));
    }

    #[tokio::test]
    async fn exchange_rejects_unparsable_body() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Ok(json_response("not json")),
        )]));

        let error = client
            .exchange::<User>(RequestConfig::get("/users/1"))
            .await
            .expect_err("parse error");

        assert!(matches!(error, HttpError::Serialization(_)));
    }

    #[tokio::test]
    async fn cancelled_token_settles_later_request() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1".into(),
            Ok(json_response("{}")),
        )]));
        let (token, cancel) = client.create_cancel_token();

        cancel.cancel();

        let error = client
            .exchange::<Value>(RequestConfig::get("/users/1").set_cancel_token(token))
            .await
            .expect_err("cancelled");

        assert!(matches!(error, HttpError::Cancelled));
    }

    #[tokio::test]
    async fn cancel_aborts_request_in_flight() {
        let client = client_with(PendingTransport);
        let (token, cancel) = client.create_cancel_token();

        let exchange =
            client.exchange::<Value>(RequestConfig::get("/hang").set_cancel_token(token));
        let (result, ()) = tokio::join!(exchange, async {
            tokio::task::yield_now().await;
            cancel.cancel();
        });

        assert!(matches!(result.expect_err("cancelled"), HttpError::Cancelled));
    }

    #[tokio::test]
    async fn request_interceptors_run_in_order() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users/1?page=2".into(),
            Ok(json_response("{}")),
        )]));

        client.add_request_interceptor(|config| {
            let url = format!("{}/users", config.url().unwrap_or(""));
            config.set_url(url)
        });
        client.add_request_interceptor(|config| {
            let url = format!("{}/1?page=2", config.url().unwrap_or(""));
            config.set_url(url)
        });

        client
            .exchange::<Value>(RequestConfig::get(""))
            .await
            .expect("interceptors applied in order");
    }

    #[tokio::test]
    async fn removed_interceptor_no_longer_applies() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users".into(),
            Ok(json_response("{}")),
        )]));

        let handle = client.add_request_interceptor(|config| config.set_url("/wrong"));
        client.remove_interceptor(handle);

        client
            .exchange::<Value>(RequestConfig::get("/users"))
            .await
            .expect("interceptor removed");
    }

    #[tokio::test]
    async fn response_interceptor_replaces_outcome() {
        let client = client_with(StubTransport::new([(
            "https://api.example.com/users".into(),
            Err(TransportError::Other("boom".into())),
        )]));

        client.add_response_interceptor(|outcome| match outcome {
            Err(HttpError::Transport(_)) => Ok(json_response(r#"{"name": "fallback"}"#)),
            outcome => outcome,
        });

        let response: Response<User> = client
            .exchange(RequestConfig::get("/users"))
            .await
            .expect("outcome replaced");

        assert_eq!(response.into_data(), User { name: "fallback".into() });
    }
}
