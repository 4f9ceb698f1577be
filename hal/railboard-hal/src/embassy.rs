//! embassy-time adapters
//!
//! On embassy boards the time driver is already running, so the blocking
//! core can borrow it: [`EmbassyClock`] reads the monotonic instant and
//! [`Delay`] busy-waits on the same driver.

use crate::clock::Clock;

pub use embassy_time::Delay;

/// Monotonic clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
