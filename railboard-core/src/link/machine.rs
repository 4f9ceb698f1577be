//! Link state machine

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No session
    #[default]
    Disconnected,
    /// Association requested, waiting for the link to report up
    Connecting,
    /// Link reported up
    Connected,
}

/// Events that move the link between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Association request issued
    ConnectRequested,
    /// Link reported connected
    LinkUp,
    /// Attempt budget spent or the request was refused
    AttemptFailed,
    /// Link reported down while connected
    LinkLost,
    /// Session explicitly torn down
    TornDown,
}

impl LinkState {
    /// Whether the link is up
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkState::Connected)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (Disconnected, ConnectRequested) => Connecting,

            (Connecting, LinkUp) => Connected,
            (Connecting, AttemptFailed) => Disconnected,

            (Connected, LinkLost) => Disconnected,

            (_, TornDown) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }
}
