//! Live Departure Board wire format
//!
//! This crate defines the HTTP exchange between the board and the upstream
//! live departure board service. Only the fields the board consumes are
//! modelled; everything else in the payload is ignored while decoding.
//!
//! # Exchange
//!
//! ```text
//! GET <base>/<origin>?numRows=<N>&filterCRS=<dest>
//! x-apikey: <key>
//!
//! 200 OK
//! { "trainServices": [ { "std", "etd", "destination": [{ "locationName" }],
//!                        "delayReason"?, "cancelReason"? }, ... ]?,
//!   "nrccMessages": [ { "Value" }, ... ]? }
//! ```
//!
//! A payload without `trainServices` means the service has nothing to
//! show for the journey; it is not an error.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod board;
pub mod decode;
pub mod request;

pub use board::{DepartureBoard, Location, NrccMessage, RawService};
pub use decode::{decode, DecodeError, DecodeErrorKind};
pub use request::{BoardRequest, API_KEY_HEADER, DEFAULT_BASE_URL};
