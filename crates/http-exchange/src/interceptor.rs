//! Request/response interceptor registry

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::HttpError;
use crate::request::RequestConfig;
use crate::transport::TransportResponse;

/// Transform applied to every outgoing request description.
///
/// Returns either the input unchanged or a replacement.
pub type RequestInterceptor = dyn Fn(RequestConfig) -> RequestConfig + Send + Sync;

/// Transform applied to every settled transport outcome, successful or
/// not.
///
/// Returns either the input unchanged or a replacement, which may flip
/// an error into a reply or vice versa.
pub type ResponseInterceptor = dyn Fn(Result<TransportResponse, HttpError>) -> Result<TransportResponse, HttpError>
    + Send
    + Sync;

/// Capability token deregistering one interceptor.
#[derive(Debug)]
pub struct InterceptorHandle {
    kind: InterceptorKind,
    id: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InterceptorKind {
    Request,
    Response,
}

/// Ordered interceptor lists, invoked in registration order.
#[derive(Default)]
pub(crate) struct Interceptors {
    request: RwLock<Vec<(u64, Box<RequestInterceptor>)>>,
    response: RwLock<Vec<(u64, Box<ResponseInterceptor>)>>,
    next_id: AtomicU64,
}

impl Interceptors {
    pub(crate) fn add_request(&self, interceptor: Box<RequestInterceptor>) -> InterceptorHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.request
            .write()
            .expect("interceptor registry poisoned")
            .push((id, interceptor));

        InterceptorHandle {
            kind: InterceptorKind::Request,
            id,
        }
    }

    pub(crate) fn add_response(&self, interceptor: Box<ResponseInterceptor>) -> InterceptorHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.response
            .write()
            .expect("interceptor registry poisoned")
            .push((id, interceptor));

        InterceptorHandle {
            kind: InterceptorKind::Response,
            id,
        }
    }

    pub(crate) fn remove(&self, handle: InterceptorHandle) {
        match handle.kind {
            InterceptorKind::Request => self
                .request
                .write()
                .expect("interceptor registry poisoned")
                .retain(|(id, _)| *id != handle.id),
            InterceptorKind::Response => self
                .response
                .write()
                .expect("interceptor registry poisoned")
                .retain(|(id, _)| *id != handle.id),
        }
    }

    pub(crate) fn apply_request(&self, config: RequestConfig) -> RequestConfig {
        self.request
            .read()
            .expect("interceptor registry poisoned")
            .iter()
            .fold(config, |config, (_, interceptor)| interceptor(config))
    }

    pub(crate) fn apply_response(
        &self,
        outcome: Result<TransportResponse, HttpError>,
    ) -> Result<TransportResponse, HttpError> {
        self.response
            .read()
            .expect("interceptor registry poisoned")
            .iter()
            .fold(outcome, |outcome, (_, interceptor)| interceptor(outcome))
    }
}
