//! Events that move a poll cycle between phases

/// Outcome of the work done in a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    // Link events
    /// Link is up
    LinkUp,
    /// Link could not be brought up
    LinkDown,

    // Fetch events
    /// A snapshot was fetched
    Fetched,
    /// Fetch failed after all retries
    FetchFailed,

    // Render events
    /// Changes drawn (possibly none)
    Rendered,

    // Sleep events
    /// Inter-poll sleep finished
    Woke,
}

impl CycleEvent {
    /// Check if this event ends the cycle early
    pub fn is_failure(&self) -> bool {
        matches!(self, CycleEvent::LinkDown | CycleEvent::FetchFailed)
    }
}
