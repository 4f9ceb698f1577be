//! Poll cycle state machine
//!
//! One cycle walks `EnsureLink -> Fetch -> Render -> Sleep`. Failures skip
//! straight to `Sleep`; there is no terminal state.

pub mod events;
pub mod machine;

pub use events::CycleEvent;
pub use machine::Phase;
