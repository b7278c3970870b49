//! Lookup of catalog entries through the iTunes Store web service.
//!
//! This module provides the [`LookupClient`] contract, its iTunes
//! implementation, the option model used to parameterize a lookup and the
//! transport seam the client sends its requests through.
mod itunes;
mod options;
mod request;
mod transport;

pub use itunes::ItunesClient;
pub use options::{LookupOption, LookupParams, with_country, with_id, with_media};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use crate::response::{LookupResponse, ResponseError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur during a lookup, one variant per failing stage.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request URL could not be built
    #[error("Failed to build lookup request: {0}")]
    RequestConstruction(String),

    /// The request could not be performed
    #[error("Lookup transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] std::io::Error),

    /// The response body is not a valid lookup response
    #[error(transparent)]
    Decode(ResponseError),
}

/// Transport-class failures, including cancellation and deadlines.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The context was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// The context deadline passed before the exchange completed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The HTTP stack failed (network, DNS, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Cancellation and deadline for a single lookup.
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can cancel an in-progress lookup. A lookup waiting on the transport
/// returns as soon as the context is cancelled or its deadline passes; the
/// deadline is also handed to the transport as a request timeout.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context expiring `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context expiring at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and all of its clones.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`Context::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Time left until the deadline, `None` if there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails if the context is done, otherwise returns the time left.
    pub(crate) fn check(&self) -> Result<Option<Duration>, TransportError> {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        match self.remaining() {
            Some(remaining) if remaining.is_zero() => Err(TransportError::DeadlineExceeded),
            remaining => Ok(remaining),
        }
    }
}

/// Contract of a catalog lookup client.
pub trait LookupClient {
    /// Looks up the catalog entry with the given id.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Cancellation and deadline for this call
    /// * `id` - Catalog identifier; always overrides any id passed in `options`
    /// * `options` - Country and media options, applied in order
    ///
    /// # Returns
    ///
    /// The decoded response, which may hold zero, one or many results
    fn lookup(
        &self,
        ctx: &Context,
        id: i64,
        options: &[LookupOption],
    ) -> Result<LookupResponse, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_context_is_open() {
        let ctx = Context::background();

        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.remaining(), None);
        assert_eq!(ctx.check().unwrap(), None);
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = Context::with_timeout(Duration::from_secs(60));
        let other = ctx.clone();

        other.cancel();

        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.check(), Err(TransportError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = Context::with_deadline(Instant::now());

        assert!(matches!(ctx.check(), Err(TransportError::DeadlineExceeded)));
    }

    #[test]
    fn test_remaining_time_is_reported() {
        let ctx = Context::with_timeout(Duration::from_secs(60));
        let remaining = ctx.check().unwrap().unwrap();

        assert!(remaining > Duration::from_secs(50));
        assert!(remaining <= Duration::from_secs(60));
    }
}
