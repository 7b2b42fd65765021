//! Transport-agnostic HTTP exchange client.
//!
//! This crate executes a generic request description ([`RequestConfig`])
//! over a pluggable HTTP backend ([`Transport`], reqwest by default) and
//! maps the backend's outcome back onto the crate's [`Response`] and
//! [`HttpError`] vocabulary. Using it allows callers to avoid direct
//! dependencies on a specific HTTP library.
//!
//! # Example
//!
//! ```no_run
//! use http_exchange::{HttpClient, HttpError, RequestConfig, Response};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! async fn example() -> Result<Response<User>, HttpError> {
//!     let client = HttpClient::builder()
//!         .base_url("https://api.example.com")
//!         .build();
//!
//!     client.exchange(RequestConfig::get("/users/1")).await
//! }
//! ```

mod backends;
mod cancel;
mod client;
mod compose;
mod error;
mod interceptor;
mod request;
mod response;
mod transport;

pub use backends::ReqwestTransport;
pub use cancel::{Cancel, CancelToken};
pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use interceptor::{InterceptorHandle, RequestInterceptor, ResponseInterceptor};
pub use request::{BasicCredentials, RequestConfig};
pub use response::Response;
pub use transport::{Transport, TransportError, TransportRequest, TransportResponse};
