//! Board-agnostic core logic for the departure board firmware
//!
//! This crate contains all application logic that does not depend on a
//! specific radio, network stack or panel:
//!
//! - Service/snapshot model
//! - Configuration types, TOML loading and validation
//! - Connectivity manager (link state machine, bounded reconnects)
//! - Data fetcher (bounded transport and decode retries, normalization)
//! - Board state (minimal redraw diffing, banner de-duplication)
//! - Poll cycle state machine and the controller loop
//!
//! Everything runs on one thread of control. The only places that wait are
//! the retry backoffs and the inter-poll sleep, all bounded and blocking.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// Must come first so the logging macros are visible to every module
mod fmt;

pub mod board;
pub mod config;
pub mod controller;
pub mod fetch;
pub mod link;
pub mod model;
pub mod state;

#[cfg(test)]
mod mocks;

pub use board::{BoardState, RenderedBoardState};
pub use config::{BoardConfig, ConfigError};
pub use controller::{Controller, CycleOutcome, FatalError};
pub use fetch::{DataFetcher, FetchError};
pub use link::{ConnectError, ConnectivityManager, LinkHandle, LinkState};
pub use model::{ServiceEntry, Snapshot, ON_TIME};
pub use state::{CycleEvent, Phase};
