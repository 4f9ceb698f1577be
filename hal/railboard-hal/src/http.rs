//! HTTP client abstraction
//!
//! A one-shot blocking GET. The response is a byte stream tied to the
//! underlying connection; dropping it releases the connection. Callers on
//! small heaps should read the body and drop the response before doing
//! anything else with the bytes.

use embedded_io::Read;

/// A request header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header<'a> {
    /// Header name
    pub name: &'a str,
    /// Header value
    pub value: &'a str,
}

/// A GET request
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request<'a> {
    /// Absolute URL
    pub url: &'a str,
    /// Extra request headers
    pub headers: &'a [Header<'a>],
    /// Upper bound for connect + first response byte
    pub timeout_ms: u32,
}

/// Transport-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Host name could not be resolved
    Dns,
    /// TCP/TLS connection could not be established
    Connect,
    /// Request timed out
    Timeout,
    /// Connection reset by peer
    Reset,
    /// Server answered with a non-2xx status
    Status(u16),
    /// Response body exceeded the configured ceiling
    BodyTooLarge,
    /// Read error while streaming the body
    Io,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Dns => f.write_str("DNS lookup failed"),
            TransportError::Connect => f.write_str("connection failed"),
            TransportError::Timeout => f.write_str("request timed out"),
            TransportError::Reset => f.write_str("connection reset"),
            TransportError::Status(code) => write!(f, "HTTP status {}", code),
            TransportError::BodyTooLarge => f.write_str("response too large"),
            TransportError::Io => f.write_str("read error"),
        }
    }
}

/// Response stream
pub trait HttpResponse: Read {
    /// HTTP status code
    fn status(&self) -> u16;

    /// Whether the status is in the 2xx range
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }
}

/// Blocking HTTP client
///
/// At most one response may be outstanding; the borrow on `self` enforces it.
pub trait HttpClient {
    /// Response type, borrowing the client's connection
    type Response<'a>: HttpResponse
    where
        Self: 'a;

    /// Issue a GET request
    ///
    /// Never blocks longer than `request.timeout_ms` before returning either
    /// a response or an error.
    fn get<'a>(&'a mut self, request: &Request<'_>) -> Result<Self::Response<'a>, TransportError>;
}
