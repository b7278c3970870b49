//! HTTP transport abstraction.
//!
//! The lookup client only needs "send one GET, get one response back", so
//! that is all [`HttpTransport`] asks for. [`ReqwestTransport`] provides it
//! on top of the blocking reqwest client; tests substitute a closure.
//!
//! Transports block; cancellation is handled by the caller waiting on them.

use super::TransportError;
use reqwest::Url;
use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

/// An outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Fully qualified URL including the query string
    pub url: Url,
    /// Upper bound for the whole exchange, if any
    pub timeout: Option<Duration>,
}

/// A response whose body has not been read yet.
///
/// The body is owned; dropping the response releases it.
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Unread response body
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Capability to perform a single HTTP request.
pub trait HttpTransport {
    /// Performs the request and returns the response with an unread body.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> HttpTransport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Transport backed by `reqwest::blocking::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing an existing client and its connection pool.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                TransportError::DeadlineExceeded
            } else {
                TransportError::Request(e)
            }
        })?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

/// Whether a body read failed because the request timeout elapsed.
///
/// The blocking reqwest body reports its timeout as an `io::Error` wrapping
/// a `reqwest::Error`, other readers use `ErrorKind::TimedOut`.
pub(crate) fn is_timeout(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::TimedOut
        || err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{SocketAddr, TcpListener, TcpStream};
    use std::thread;

    /// Reads the request head so the client sees its request consumed.
    fn read_request_head(stream: &mut TcpStream) {
        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            match stream.read(&mut byte) {
                Ok(1) => head.push(byte[0]),
                _ => break,
            }
        }
    }

    /// Serves exactly one connection with `handler` on a local port.
    fn serve_once<F>(handler: F) -> SocketAddr
    where
        F: FnOnce(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                handler(stream);
            }
        });
        addr
    }

    fn transport() -> ReqwestTransport {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        ReqwestTransport::with_client(client)
    }

    fn request(addr: SocketAddr, timeout: Option<Duration>) -> HttpRequest {
        HttpRequest {
            url: Url::parse(&format!("http://{}/lookup?id=1&media=&country=", addr)).unwrap(),
            timeout,
        }
    }

    #[test]
    fn test_status_and_body_are_passed_through() {
        let payload = r#"{"resultCount":0,"results":[]}"#;
        let addr = serve_once(move |mut stream| {
            read_request_head(&mut stream);
            let reply = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                payload.len(),
                payload
            );
            let _ = stream.write_all(reply.as_bytes());
        });

        let mut response = transport()
            .execute(request(addr, Some(Duration::from_secs(5))))
            .unwrap();

        let mut body = String::new();
        response.body.read_to_string(&mut body).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(body, payload);
    }

    #[test]
    fn test_silent_server_exceeds_deadline() {
        let addr = serve_once(|mut stream| {
            read_request_head(&mut stream);
            thread::sleep(Duration::from_secs(2));
        });

        let result = transport().execute(request(addr, Some(Duration::from_millis(100))));

        assert!(matches!(result, Err(TransportError::DeadlineExceeded)));
    }

    #[test]
    fn test_timed_out_kind_is_timeout() {
        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset");

        assert!(is_timeout(&timed_out));
        assert!(!is_timeout(&reset));
    }
}
