//! Typed response wrapper

use http::{HeaderMap, StatusCode};

/// A successful reply: the deserialized payload plus transport metadata.
#[derive(Clone, Debug)]
pub struct Response<T> {
    status: StatusCode,
    headers: HeaderMap,
    data: T,
}

impl<T> Response<T> {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, data: T) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    /// HTTP status code of the reply.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Borrows the deserialized payload.
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the response, returning the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}
