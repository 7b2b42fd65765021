//! Cooperative request cancellation

use tokio_util::sync::CancellationToken;

/// Creates a paired cancellation token and trigger.
pub(crate) fn cancel_pair() -> (CancelToken, Cancel) {
    let token = CancellationToken::new();

    (
        CancelToken {
            token: token.clone(),
        },
        Cancel { token },
    )
}

/// A cancellation signal attached to a single in-flight request.
///
/// Obtained from
/// [`HttpClient::create_cancel_token`](crate::HttpClient::create_cancel_token)
/// and consumed by
/// [`RequestConfig::set_cancel_token`](crate::RequestConfig::set_cancel_token).
/// The token is move-only; allocate a fresh pair per request.
#[derive(Debug)]
pub struct CancelToken {
    token: CancellationToken,
}

impl CancelToken {
    /// Returns `true` once the paired [`Cancel`] has been invoked.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the paired [`Cancel`] has been invoked.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}

/// The trigger half of a cancellation pair.
#[derive(Debug)]
pub struct Cancel {
    token: CancellationToken,
}

impl Cancel {
    /// Transitions the paired token to the cancelled state.
    ///
    /// Invoking this more than once has no effect beyond the first.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}
