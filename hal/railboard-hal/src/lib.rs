//! Railboard Platform Abstraction Layer
//!
//! This crate defines the platform traits the departure board core is
//! written against. Board crates implement them for their radio, network
//! stack and timer; tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board firmware (wiring + entry point)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  railboard-core (poll / diff / render)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  railboard-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::Clock`] - Monotonic millisecond time source
//! - [`clock::DelayNs`] - Blocking delay (from `embedded-hal`)
//! - [`wifi::WifiLink`] - Station-mode network link
//! - [`http::HttpClient`], [`http::HttpResponse`] - One-shot HTTP GET
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//! - `serde` - Deserialize credentials from configuration
//! - `embassy-time` - [`embassy::EmbassyClock`] and blocking delay on embassy boards

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod http;
pub mod wifi;

#[cfg(feature = "embassy-time")]
pub mod embassy;

// Re-export key traits at crate root for convenience
pub use clock::{Clock, DelayNs};
pub use http::{Header, HttpClient, HttpResponse, Request, TransportError};
pub use wifi::{LinkError, NetConfig, WifiCredentials, WifiLink};
