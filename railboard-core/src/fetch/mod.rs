//! Departure data acquisition
//!
//! One remote call per poll, with independent bounded retries for the
//! transport and for decoding, then normalization into a [`Snapshot`].
//!
//! [`Snapshot`]: crate::model::Snapshot

pub mod fetcher;
pub mod normalize;

pub use fetcher::{DataFetcher, FetchError};
pub use normalize::normalize;
