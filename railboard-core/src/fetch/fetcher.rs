//! Data fetcher
//!
//! Transport and decoding fail for different reasons, so each gets its own
//! retry budget. A decode retry re-reads the captured body; it never issues
//! another request.

use alloc::vec::Vec;

use embedded_io::{Error as _, ErrorKind};
use railboard_hal::{DelayNs, Header, HttpClient, HttpResponse, Request, TransportError};
use railboard_protocol::{decode, BoardRequest, DecodeError, API_KEY_HEADER};

use super::normalize::normalize;
use crate::config::RetryPolicy;
use crate::model::Snapshot;

/// Body read chunk size
const READ_CHUNK: usize = 256;

/// Fetch failed after every allowed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Every HTTP attempt failed
    Transport {
        /// Requests issued
        attempts: u32,
        /// Failure of the final attempt
        last: TransportError,
    },
    /// The body never decoded
    Parse {
        /// Decode attempts made
        attempts: u32,
        /// Failure of the final attempt
        last: DecodeError,
    },
}

impl FetchError {
    /// Attempts made in the phase that failed
    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::Transport { attempts, .. } | FetchError::Parse { attempts, .. } => {
                *attempts
            }
        }
    }
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::Transport { attempts, last } => {
                write!(f, "request failed after {} attempts: {}", attempts, last)
            }
            FetchError::Parse { attempts, last } => {
                write!(f, "response unreadable after {} attempts: {}", attempts, last)
            }
        }
    }
}

/// Issues departure board requests
///
/// Owns the HTTP client. Nothing from one fetch is kept for the next.
pub struct DataFetcher<H> {
    http: H,
}

impl<H: HttpClient> DataFetcher<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying client
    pub fn client(&self) -> &H {
        &self.http
    }

    /// Fetch and normalize one board
    ///
    /// Makes at most `transport_retries + 1` requests and at most
    /// `parse_retries + 1` decode attempts, sleeping the configured backoff
    /// between attempts. The snapshot holds at most `request.rows` entries.
    pub fn fetch<D: DelayNs>(
        &mut self,
        request: &BoardRequest<'_>,
        api_key: &str,
        policy: &RetryPolicy,
        delay: &mut D,
    ) -> Result<Snapshot, FetchError> {
        let url = request.url();
        let headers = [Header {
            name: API_KEY_HEADER,
            value: api_key,
        }];
        let http_request = Request {
            url: &url,
            headers: &headers,
            timeout_ms: policy.request_timeout_ms,
        };

        let body = self.capture_with_retry(&http_request, policy, delay)?;
        debug!("Captured {} byte body", body.len());

        let board = decode_with_retry(&body, policy, delay)?;
        drop(body);

        let snapshot = normalize(board, request.rows);
        debug!(
            "Snapshot: {} entries, has_data={}",
            snapshot.entries().len(),
            snapshot.has_data()
        );
        Ok(snapshot)
    }

    fn capture_with_retry<D: DelayNs>(
        &mut self,
        request: &Request<'_>,
        policy: &RetryPolicy,
        delay: &mut D,
    ) -> Result<Vec<u8>, FetchError> {
        let allowed = policy.transport_retries.saturating_add(1);
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.capture(request, policy.max_body_len) {
                Ok(body) => return Ok(body),
                Err(last) if attempts >= allowed => {
                    warn!("Request failed ({}), giving up after {}", last, attempts);
                    return Err(FetchError::Transport { attempts, last });
                }
                Err(e) => {
                    warn!("Request failed ({}), retry {}/{}", e, attempts, allowed - 1);
                    delay.delay_ms(policy.fetch_backoff_ms);
                }
            }
        }
    }

    /// One request; the response is released before returning
    fn capture(&mut self, request: &Request<'_>, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut response = self.http.get(request)?;
        if !response.is_success() {
            return Err(TransportError::Status(response.status()));
        }
        let body = read_body(&mut response, max_len);
        drop(response);
        body
    }
}

fn decode_with_retry<D: DelayNs>(
    body: &[u8],
    policy: &RetryPolicy,
    delay: &mut D,
) -> Result<railboard_protocol::DepartureBoard, FetchError> {
    let allowed = policy.parse_retries.saturating_add(1);
    let mut attempts = 0;
    loop {
        attempts += 1;
        match decode(body) {
            Ok(board) => return Ok(board),
            Err(last) if attempts >= allowed => {
                warn!("Decode failed ({}), giving up after {}", last, attempts);
                return Err(FetchError::Parse { attempts, last });
            }
            Err(e) => {
                warn!("Decode failed ({}), retry {}/{}", e, attempts, allowed - 1);
                delay.delay_ms(policy.parse_backoff_ms);
            }
        }
    }
}

/// Read a whole body, refusing anything over `max_len` bytes
fn read_body<R: embedded_io::Read>(reader: &mut R, max_len: usize) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).map_err(|e| match e.kind() {
            ErrorKind::TimedOut => TransportError::Timeout,
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => TransportError::Reset,
            _ => TransportError::Io,
        })?;
        if n == 0 {
            return Ok(body);
        }
        if body.len() + n > max_len {
            return Err(TransportError::BodyTooLarge);
        }
        body.extend_from_slice(&chunk[..n]);
    }
}
