//! Time abstractions
//!
//! The core never reads a hardware timer directly. Waiting is always an
//! explicit, bounded, blocking delay through [`DelayNs`]; elapsed time is
//! read from a [`Clock`].

pub use embedded_hal::delay::DelayNs;

/// Monotonic time source
///
/// Readings never go backwards. The epoch is arbitrary (usually boot).
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since an earlier reading
    fn elapsed_since(&self, earlier_ms: u64) -> u64 {
        self.now_ms().saturating_sub(earlier_ms)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
