//! HTTP transport backends

pub mod reqwest_backend;
#[cfg(test)]
pub(crate) mod stub_backend;

pub use reqwest_backend::ReqwestTransport;
#[cfg(test)]
pub(crate) use stub_backend::{PendingTransport, StubTransport};
