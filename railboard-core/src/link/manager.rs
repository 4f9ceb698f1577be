//! Connectivity manager
//!
//! Owns the Wi-Fi link and brings it up with a bounded number of status
//! polls. It never retries on its own; the caller decides what a failed
//! attempt means.

use railboard_hal::{DelayNs, LinkError, NetConfig, WifiCredentials, WifiLink};

use super::machine::{LinkEvent, LinkState};

/// Link never came up within the attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectError {
    /// Status polls made before giving up (0 if the request was refused)
    pub attempts_made: u32,
    /// Driver error, if the association request itself failed
    pub cause: Option<LinkError>,
}

impl core::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.cause {
            Some(LinkError::Radio) => f.write_str("radio could not be activated"),
            Some(LinkError::Rejected) => f.write_str("association rejected"),
            Some(LinkError::Timeout) => f.write_str("driver timed out"),
            None => write!(f, "no link after {} attempts", self.attempts_made),
        }
    }
}

/// Proof of an established session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkHandle {
    /// Increments on every fresh session
    pub session: u32,
    /// Assigned network configuration, for diagnostics
    pub net_config: Option<NetConfig>,
}

/// Wi-Fi link owner
pub struct ConnectivityManager<W> {
    link: W,
    state: LinkState,
    handle: Option<LinkHandle>,
    sessions: u32,
}

impl<W: WifiLink> ConnectivityManager<W> {
    /// Wrap a link driver; the link starts disconnected
    pub fn new(link: W) -> Self {
        Self {
            link,
            state: LinkState::Disconnected,
            handle: None,
            sessions: 0,
        }
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Current session, if connected
    pub fn handle(&self) -> Option<LinkHandle> {
        self.handle
    }

    /// Underlying driver
    pub fn link(&self) -> &W {
        &self.link
    }

    /// Underlying driver, mutably
    pub fn link_mut(&mut self) -> &mut W {
        &mut self.link
    }

    /// Make sure the link is up
    ///
    /// A live session is returned as is. Otherwise any stale session is
    /// torn down, one association request is issued and the link status is
    /// polled up to `max_attempts` times, `retry_delay_ms` apart. Blocks for
    /// at most `(max_attempts - 1) * retry_delay_ms` plus driver time.
    pub fn ensure_connected<D: DelayNs>(
        &mut self,
        credentials: &WifiCredentials,
        max_attempts: u32,
        retry_delay_ms: u32,
        delay: &mut D,
    ) -> Result<LinkHandle, ConnectError> {
        if let (LinkState::Connected, Some(handle)) = (self.observe(), self.handle) {
            return Ok(handle);
        }

        // Never leave an old session behind a new one
        self.teardown();

        info!("Connecting to {}", credentials.ssid.as_str());
        self.state = self.state.transition(LinkEvent::ConnectRequested);
        if let Err(e) = self.request(credentials) {
            warn!("Connect request failed: {}", e);
            self.state = self.state.transition(LinkEvent::AttemptFailed);
            self.link.disconnect();
            return Err(ConnectError {
                attempts_made: 0,
                cause: Some(e),
            });
        }

        for attempt in 1..=max_attempts {
            if self.link.is_connected() {
                self.state = self.state.transition(LinkEvent::LinkUp);
                self.sessions = self.sessions.wrapping_add(1);
                let handle = LinkHandle {
                    session: self.sessions,
                    net_config: self.link.net_config(),
                };
                if let Some(net) = handle.net_config {
                    info!(
                        "Link up after {} polls: address {}, gateway {}, dns {}",
                        attempt, net.address, net.gateway, net.dns
                    );
                } else {
                    info!("Link up after {} polls", attempt);
                }
                self.handle = Some(handle);
                return Ok(handle);
            }
            debug!("Waiting for link ({}/{})", attempt, max_attempts);
            if attempt < max_attempts {
                delay.delay_ms(retry_delay_ms);
            }
        }

        warn!("Link not up after {} polls", max_attempts);
        self.state = self.state.transition(LinkEvent::AttemptFailed);
        self.link.disconnect();
        Err(ConnectError {
            attempts_made: max_attempts,
            cause: None,
        })
    }

    /// Poll the link and record loss of a live session
    pub fn observe(&mut self) -> LinkState {
        if self.state.is_connected() && !self.link.is_connected() {
            warn!("Link lost");
            self.state = self.state.transition(LinkEvent::LinkLost);
            self.handle = None;
        }
        self.state
    }

    /// Tear down the session
    pub fn disconnect(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.link.disconnect();
        self.state = self.state.transition(LinkEvent::TornDown);
        self.handle = None;
    }

    fn request(&mut self, credentials: &WifiCredentials) -> Result<(), LinkError> {
        self.link.activate()?;
        self.link.connect(credentials)
    }
}
