//! Render sink traits and shared display components for Railboard
//!
//! This crate provides:
//! - `RenderSink` trait for the departure board surface (cells + banner)
//! - `ErrorSink` trait for the full-screen fatal error page
//! - `RenderOp` for recording and replaying draw operations
//! - `BoardLayout` describing where rows, columns and the banner live
//! - `TextBoard`, a character board implementing both sinks
//!
//! # Architecture
//!
//! The board core never draws pixels or lays out glyphs. It emits a minimal
//! set of `RenderOp`s per poll cycle and applies them to a `RenderSink`.
//! Panel drivers (e-paper, OLED, simulator) implement the sink and decide
//! how a cell or banner line turns into pixels.
//!
//! ## Slow-refresh panels
//!
//! E-paper panels take seconds to refresh. A driver typically keeps a
//! `TextBoard` as its back buffer, applies ops to it, and pushes a single
//! refresh to the glass on `flush()`.

#![no_std]

extern crate alloc;

pub mod layout;
pub mod sink;
pub mod text_board;

// Re-export key types
pub use layout::{BoardLayout, Column, ColumnSpec};
pub use sink::{apply_all, ErrorSink, RenderError, RenderOp, RenderSink};
pub use text_board::TextBoard;
