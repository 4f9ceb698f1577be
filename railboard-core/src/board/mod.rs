//! Board state and redraw diffing

pub mod state;

pub use state::{BoardState, RenderedBoardState};
