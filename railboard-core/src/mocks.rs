//! Test doubles for the HAL traits

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use embedded_io::{ErrorKind, ErrorType, Read};
use railboard_hal::{
    Clock, DelayNs, HttpClient, HttpResponse, LinkError, NetConfig, Request, TransportError,
    WifiCredentials, WifiLink,
};

/// Shared millisecond timeline driven by [`MockDelay`]
#[derive(Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Records every delay and advances the shared clock
#[derive(Clone, Default)]
pub struct MockDelay {
    clock: MockClock,
    sleeps: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    pub fn new(clock: &MockClock) -> Self {
        Self {
            clock: clock.clone(),
            sleeps: Rc::default(),
        }
    }

    /// Every delay requested so far, in ms
    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }

    pub fn total_ms(&self) -> u64 {
        self.sleeps.borrow().iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.clock.advance(u64::from(ms));
    }
}

/// Scripted Wi-Fi link
///
/// After a connect request the link comes up on the `up_after_polls`-th
/// status poll; `None` means it never comes up.
pub struct MockLink {
    pub up_after_polls: Option<u32>,
    pub fail_connect: Option<LinkError>,
    pub net_config: NetConfig,
    pub activate_calls: u32,
    pub connect_calls: u32,
    pub disconnect_calls: u32,
    pub status_polls: u32,
    pub last_ssid: String,
    /// Association requests not yet torn down
    pub open_sessions: u32,
    polls_since_connect: u32,
    connected: bool,
}

impl MockLink {
    pub fn new(up_after_polls: Option<u32>) -> Self {
        Self {
            up_after_polls,
            fail_connect: None,
            net_config: NetConfig {
                address: [192, 168, 1, 50],
                netmask: [255, 255, 255, 0],
                gateway: [192, 168, 1, 1],
                dns: [192, 168, 1, 1],
            },
            activate_calls: 0,
            connect_calls: 0,
            disconnect_calls: 0,
            status_polls: 0,
            last_ssid: String::new(),
            open_sessions: 0,
            polls_since_connect: 0,
            connected: false,
        }
    }

    /// Link that comes up on the first status poll
    pub fn up() -> Self {
        Self::new(Some(1))
    }

    /// Simulate the access point going away
    pub fn drop_link(&mut self) {
        self.connected = false;
    }
}

impl WifiLink for MockLink {
    fn activate(&mut self) -> Result<(), LinkError> {
        self.activate_calls += 1;
        Ok(())
    }

    fn connect(&mut self, credentials: &WifiCredentials) -> Result<(), LinkError> {
        self.connect_calls += 1;
        self.last_ssid = String::from(credentials.ssid.as_str());
        if let Some(err) = self.fail_connect {
            return Err(err);
        }
        self.open_sessions += 1;
        self.polls_since_connect = 0;
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.status_polls += 1;
        if self.open_sessions > 0 && !self.connected {
            self.polls_since_connect += 1;
            if self.up_after_polls == Some(self.polls_since_connect) {
                self.connected = true;
            }
        }
        self.connected
    }

    fn disconnect(&mut self) {
        self.disconnect_calls += 1;
        self.open_sessions = 0;
        self.connected = false;
    }

    fn net_config(&self) -> Option<NetConfig> {
        self.connected.then_some(self.net_config)
    }
}

/// One scripted HTTP outcome
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Request fails before a response arrives
    Fail(TransportError),
    /// Response with status and body
    Body(u16, Vec<u8>),
    /// Response whose body stream errors after `n` bytes
    ResetAfter(usize, Vec<u8>),
}

impl MockReply {
    pub fn ok(body: &str) -> Self {
        MockReply::Body(200, body.as_bytes().to_vec())
    }
}

/// Scripted HTTP client
///
/// Replies are consumed in order; once the script runs out `fallback`
/// is repeated.
pub struct MockHttp {
    script: VecDeque<MockReply>,
    fallback: MockReply,
    pub calls: u32,
    pub last_url: String,
    pub last_api_key: Option<String>,
    pub last_timeout_ms: u32,
    /// Responses currently alive
    pub open: Rc<Cell<u32>>,
    /// Simulated round trip per request
    pub latency: Option<(MockClock, u64)>,
}

impl MockHttp {
    pub fn new(script: impl IntoIterator<Item = MockReply>, fallback: MockReply) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            calls: 0,
            last_url: String::new(),
            last_api_key: None,
            last_timeout_ms: 0,
            open: Rc::default(),
            latency: None,
        }
    }

    /// Client that always answers with `body`
    pub fn always(body: &str) -> Self {
        Self::new([], MockReply::ok(body))
    }

    /// Client whose every request fails
    pub fn failing(err: TransportError) -> Self {
        Self::new([], MockReply::Fail(err))
    }
}

impl HttpClient for MockHttp {
    type Response<'a>
        = MockResponse
    where
        Self: 'a;

    fn get<'a>(&'a mut self, request: &Request<'_>) -> Result<Self::Response<'a>, TransportError> {
        self.calls += 1;
        self.last_url = String::from(request.url);
        self.last_timeout_ms = request.timeout_ms;
        self.last_api_key = request
            .headers
            .iter()
            .find(|h| h.name == railboard_protocol::API_KEY_HEADER)
            .map(|h| String::from(h.value));
        if let Some((clock, ms)) = &self.latency {
            clock.advance(*ms);
        }

        let reply = self.script.pop_front().unwrap_or_else(|| self.fallback.clone());
        let (status, body, fail_at) = match reply {
            MockReply::Fail(err) => return Err(err),
            MockReply::Body(status, body) => (status, body, None),
            MockReply::ResetAfter(n, body) => (200, body, Some(n)),
        };
        self.open.set(self.open.get() + 1);
        Ok(MockResponse {
            status,
            body,
            pos: 0,
            fail_at,
            open: self.open.clone(),
        })
    }
}

/// Response streaming a scripted body in small chunks
pub struct MockResponse {
    status: u16,
    body: Vec<u8>,
    pos: usize,
    fail_at: Option<usize>,
    open: Rc<Cell<u32>>,
}

impl Drop for MockResponse {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}

impl ErrorType for MockResponse {
    type Error = ErrorKind;
}

impl Read for MockResponse {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let end = self.fail_at.unwrap_or(self.body.len()).min(self.body.len());
        if self.fail_at.is_some() && self.pos >= end {
            return Err(ErrorKind::ConnectionReset);
        }
        // Short reads, like a socket
        let n = buf.len().min(97).min(end - self.pos);
        buf[..n].copy_from_slice(&self.body[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl HttpResponse for MockResponse {
    fn status(&self) -> u16 {
        self.status
    }
}
