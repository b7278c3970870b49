/// iTunes Store lookup client implementation.
use super::options::{LookupOption, LookupParams, with_id};
use super::request::{DEFAULT_BASE_URL, build_lookup_url};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, is_timeout};
use super::{Context, LookupClient, LookupError, TransportError};
use crate::response::LookupResponse;
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// How often a waiting lookup checks its context for cancellation.
const CONTEXT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lookup client for the iTunes Store web service.
///
/// Every call builds its own parameters and request, so a client can be
/// shared between threads as long as its transport can.
#[derive(Debug)]
pub struct ItunesClient<T = ReqwestTransport> {
    transport: Arc<T>,
    base_url: String,
}

impl ItunesClient {
    /// Creates a client talking to https://itunes.apple.com over reqwest.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for ItunesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ItunesClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
        }
    }
}

impl<T> ItunesClient<T>
where
    T: HttpTransport + Send + Sync + 'static,
{
    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Replaces the base URL the lookup path is appended to.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Runs the request on a worker thread and waits for it while
    /// watching the context.
    ///
    /// If the context is cancelled or expires first, the worker is
    /// abandoned; its response, if one still arrives, is dropped there.
    fn execute(
        &self,
        ctx: &Context,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);

        thread::Builder::new()
            .name("itunes-lookup".to_string())
            .spawn(move || {
                // The receiver is gone when the lookup gave up waiting
                let _ = tx.send(transport.execute(request));
            })
            .map_err(|e| {
                TransportError::Other(format!("Failed to spawn request thread: {}", e))
            })?;

        loop {
            match rx.recv_timeout(CONTEXT_POLL_INTERVAL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => {
                    ctx.check()?;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(TransportError::Other(
                        "Request thread exited without a response".to_string(),
                    ));
                }
            }
        }
    }
}

/// Classifies a failed body read.
///
/// Reads cut short by the context or by the transport timeout are
/// transport-class failures; everything else is a read failure.
fn body_read_error(ctx: &Context, err: io::Error) -> LookupError {
    if ctx.is_cancelled() {
        return TransportError::Cancelled.into();
    }

    let deadline_passed = ctx.remaining().is_some_and(|remaining| remaining.is_zero());
    if deadline_passed || is_timeout(&err) {
        return TransportError::DeadlineExceeded.into();
    }

    LookupError::ReadBody(err)
}

impl<T> LookupClient for ItunesClient<T>
where
    T: HttpTransport + Send + Sync + 'static,
{
    fn lookup(
        &self,
        ctx: &Context,
        id: i64,
        options: &[LookupOption],
    ) -> Result<LookupResponse, LookupError> {
        // The call's own id is applied last and wins over any id option
        let id_option = with_id(id);
        let params = LookupParams::from_options(options.iter().chain([&id_option]));

        let url = build_lookup_url(&self.base_url, &params)?;

        let timeout = ctx.check()?;

        debug!(%url, "Sending lookup request");
        let mut response = self.execute(ctx, HttpRequest { url, timeout })?;

        if ctx.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }

        if !(200..300).contains(&response.status) {
            warn!(
                status = response.status,
                id, "Lookup returned non-success status, decoding body anyway"
            );
        }

        let mut body = Vec::new();
        response
            .body
            .read_to_end(&mut body)
            .map_err(|e| body_read_error(ctx, e))?;

        debug!(
            status = response.status,
            bytes = body.len(),
            "Received lookup response"
        );

        LookupResponse::decode(&body).map_err(LookupError::Decode)
    }
}
