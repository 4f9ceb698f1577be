//! Configuration type definitions
//!
//! Every section except the journey itself has defaults, so a minimal
//! config only names the stations, the API key and the Wi-Fi network.

use alloc::string::String;

use heapless::String as HString;
use serde::Deserialize;

use railboard_display::BoardLayout;
use railboard_hal::WifiCredentials;
use railboard_protocol::{BoardRequest, DEFAULT_BASE_URL};

/// Maximum station code length
pub const MAX_CRS_LEN: usize = 8;

/// Default number of service rows
pub const DEFAULT_ROWS: usize = 5;

/// Default banner text when a journey has no direct services
pub const DEFAULT_NO_SERVICES: &str = "There are no direct trains between these stations today. \
     Please check the National Rail website for more info.";

/// Default banner text when the Wi-Fi link drops
pub const DEFAULT_LINK_LOST: &str = "Connection lost, reconnecting...";

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Origin station CRS code
    pub origin: HString<MAX_CRS_LEN>,
    /// Destination filter CRS code
    pub destination: HString<MAX_CRS_LEN>,
    /// Service rows on the board (N)
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Live departure board API key
    pub api_key: String,
    /// Departure board endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Wi-Fi network
    pub wifi: WifiCredentials,
    /// Retry and timeout limits
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Poll cadence
    #[serde(default)]
    pub timing: TimingConfig,
    /// Banner text
    #[serde(default)]
    pub messages: MessageConfig,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

impl BoardConfig {
    /// Title line for this journey ("PAD -> RDG")
    pub fn title(&self) -> String {
        BoardLayout::title(&self.origin, &self.destination)
    }

    /// Upstream query for this journey
    pub fn request(&self) -> BoardRequest<'_> {
        BoardRequest {
            base_url: &self.base_url,
            origin: &self.origin,
            destination: &self.destination,
            rows: self.rows,
        }
    }
}

/// Retry and timeout limits
///
/// Every retry loop in the core is bounded by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct RetryPolicy {
    /// Link status polls per connect attempt
    pub connect_attempts: u32,
    /// Delay between link status polls (ms)
    pub connect_retry_delay_ms: u32,
    /// Extra HTTP attempts after the first
    pub transport_retries: u32,
    /// Extra decode attempts after the first
    pub parse_retries: u32,
    /// Delay before an HTTP retry (ms)
    pub fetch_backoff_ms: u32,
    /// Delay before a decode retry (ms)
    pub parse_backoff_ms: u32,
    /// Per-request timeout (ms)
    pub request_timeout_ms: u32,
    /// Largest accepted response body (bytes)
    pub max_body_len: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            connect_attempts: 10,
            connect_retry_delay_ms: 1_000,
            transport_retries: 3,
            parse_retries: 2,
            fetch_backoff_ms: 2_000,
            parse_backoff_ms: 500,
            request_timeout_ms: 10_000,
            max_body_len: 16 * 1024,
        }
    }
}

/// Poll cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TimingConfig {
    /// Time from the start of one poll to the start of the next (ms)
    pub poll_interval_ms: u32,
    /// Sleep after a failed reconnect (ms)
    pub reconnect_backoff_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 30_000,
            reconnect_backoff_ms: 5_000,
        }
    }
}

/// Banner text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Shown when upstream reports no services and sends no notice
    pub no_services: String,
    /// Shown once each time the Wi-Fi link drops
    pub link_lost: String,
    /// Banner lines kept on screen
    pub banner_lines: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            no_services: String::from(DEFAULT_NO_SERVICES),
            link_lost: String::from(DEFAULT_LINK_LOST),
            banner_lines: 3,
        }
    }
}
