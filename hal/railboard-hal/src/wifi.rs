//! Wi-Fi station link abstraction
//!
//! Models the small surface a blocking firmware needs from a radio driver:
//! bring the interface up, request an association, poll whether the link is
//! up, and tear the session down again.

use heapless::String;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Maximum SSID length in bytes (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length in bytes
pub const MAX_PASSWORD_LEN: usize = 64;

/// Station credentials
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct WifiCredentials {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// Passphrase (empty for open networks)
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: String<MAX_PASSWORD_LEN>,
}

impl core::fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WifiCredentials {
    // Never log the passphrase
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "WifiCredentials(ssid={})", self.ssid.as_str());
    }
}

/// Network configuration assigned to the station (DHCP or static)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetConfig {
    /// Station address
    pub address: [u8; 4],
    /// Subnet mask
    pub netmask: [u8; 4],
    /// Default gateway
    pub gateway: [u8; 4],
    /// DNS server
    pub dns: [u8; 4],
}

/// Errors reported by the radio driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Radio could not be activated
    Radio,
    /// Driver refused the association request
    Rejected,
    /// Driver did not respond in time
    Timeout,
}

/// Station-mode network link
pub trait WifiLink {
    /// Power up the interface in station mode
    fn activate(&mut self) -> Result<(), LinkError>;

    /// Issue an association request
    ///
    /// Returns once the request has been accepted by the driver; the link
    /// may come up later. Poll [`WifiLink::is_connected`] to observe it.
    fn connect(&mut self, credentials: &WifiCredentials) -> Result<(), LinkError>;

    /// Whether the link currently reports connected
    fn is_connected(&mut self) -> bool;

    /// Tear down any existing session
    ///
    /// Must be safe to call when no session exists.
    fn disconnect(&mut self);

    /// Network configuration of the current session, if any
    fn net_config(&self) -> Option<NetConfig>;
}
