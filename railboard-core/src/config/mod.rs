//! Board configuration
//!
//! Loaded from TOML text and validated once at startup. The core never
//! re-reads configuration while running.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::*;
