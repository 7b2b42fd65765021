//! Generic request description

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

use crate::cancel::CancelToken;
use crate::error::HttpError;

/// A transport-agnostic description of one HTTP request.
///
/// Request-level values take precedence over the client-level defaults
/// when both are present.
#[derive(Debug, Default)]
pub struct RequestConfig {
    pub(crate) method: Method,
    pub(crate) url: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) headers: Option<HeaderMap>,
    pub(crate) auth: Option<BasicCredentials>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) cancel: Option<CancelToken>,
}

impl RequestConfig {
    /// Creates a request description for `method` and `url`.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Creates a GET request description.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request description.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, or absolute URL when no base URL applies.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Request-level base URL override.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Request-level headers.
    pub const fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    /// Basic-Auth credentials.
    pub const fn auth(&self) -> Option<&BasicCredentials> {
        self.auth.as_ref()
    }

    /// Request body bytes.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Sets the HTTP method.
    pub fn set_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path or absolute URL.
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Overrides the client-level base URL for this request.
    pub fn set_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replaces the request-level headers.
    pub fn set_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds one request-level header.
    pub fn set_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Attaches Basic-Auth credentials.
    ///
    /// These always win the `Authorization` header over any value set
    /// through [`set_header`](Self::set_header) or the client defaults.
    pub fn set_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(BasicCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the raw request body.
    pub fn set_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as the JSON request body and sets the
    /// `Content-Type` header accordingly.
    pub fn set_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, HttpError> {
        let bytes = serde_json::to_vec(body)?;

        Ok(self
            .set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .set_body(bytes))
    }

    /// Attaches the cancellation token observed by the transport.
    pub fn set_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Username/password pair for HTTP Basic authentication.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BasicCredentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}
