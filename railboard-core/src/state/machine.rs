//! Cycle phase definition

use super::events::CycleEvent;

/// Poll cycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Bring the link up if it is down
    #[default]
    EnsureLink,
    /// Request and normalize the board
    Fetch,
    /// Diff against the panel and draw
    Render,
    /// Wait for the next poll
    Sleep,
}

impl Phase {
    /// Check if this phase touches the network
    pub fn uses_network(&self) -> bool {
        matches!(self, Phase::EnsureLink | Phase::Fetch)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: CycleEvent) -> Self {
        use CycleEvent::*;
        use Phase::*;

        match (self, event) {
            (EnsureLink, LinkUp) => Fetch,
            (EnsureLink, LinkDown) => Sleep,

            (Fetch, Fetched) => Render,
            (Fetch, FetchFailed) => Sleep,

            (Render, Rendered) => Sleep,

            (Sleep, Woke) => EnsureLink,

            // Default: stay in current phase
            _ => self,
        }
    }
}
