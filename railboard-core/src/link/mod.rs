//! Network link lifecycle
//!
//! The link is either down, being brought up, or up. Only connect attempts
//! and observed loss move it between those states.

pub mod machine;
pub mod manager;

pub use machine::{LinkEvent, LinkState};
pub use manager::{ConnectError, ConnectivityManager, LinkHandle};
