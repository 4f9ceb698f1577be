//! Render sink traits
//!
//! Defines the surface the board core draws on.

use alloc::string::String;

use crate::layout::Column;

/// Render sink errors
///
/// Any of these means the panel driver is in an unknown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Communication error with the panel
    Communication,
    /// Row or column outside the board
    InvalidCoordinates,
    /// Panel not initialized
    NotInitialized,
    /// Frame buffer overflow
    BufferOverflow,
}

impl core::fmt::Display for RenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            RenderError::Communication => "display communication error",
            RenderError::InvalidCoordinates => "display coordinates out of range",
            RenderError::NotInitialized => "display not initialized",
            RenderError::BufferOverflow => "display buffer overflow",
        };
        f.write_str(text)
    }
}

/// Departure board surface
///
/// Operations may be buffered; nothing is guaranteed visible before
/// [`RenderSink::flush`].
pub trait RenderSink {
    /// Set the text of one cell in a service row
    ///
    /// - `row`: Service row (0-based, below the headings)
    /// - `column`: Cell within the row
    /// - `text`: Cell text; an empty string blanks the cell
    fn set_cell(&mut self, row: usize, column: Column, text: &str) -> Result<(), RenderError>;

    /// Append a line to the banner area
    ///
    /// The banner keeps at most `max_retained_lines`; older lines scroll off.
    fn append_line(&mut self, text: &str, max_retained_lines: usize) -> Result<(), RenderError>;

    /// Remove every banner line
    fn clear_lines(&mut self) -> Result<(), RenderError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), RenderError>;
}

/// Full-screen error page
pub trait ErrorSink {
    /// Overwrite the whole screen with an error
    ///
    /// - `context_line`: What the board was showing ("PAD -> RDG")
    /// - `error_text`: Human-readable failure
    fn show_fatal(&mut self, context_line: &str, error_text: &str) -> Result<(), RenderError>;
}

/// One draw operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Set one cell of a service row
    SetCell {
        row: usize,
        column: Column,
        text: String,
    },
    /// Append a banner line
    AppendLine { text: String, max_retained: usize },
    /// Clear the banner
    ClearLines,
}

impl RenderOp {
    /// Apply this operation to a sink
    pub fn apply<S: RenderSink + ?Sized>(&self, sink: &mut S) -> Result<(), RenderError> {
        match self {
            RenderOp::SetCell { row, column, text } => sink.set_cell(*row, *column, text),
            RenderOp::AppendLine { text, max_retained } => sink.append_line(text, *max_retained),
            RenderOp::ClearLines => sink.clear_lines(),
        }
    }

    /// Whether this op blanks a cell
    pub fn is_blank_cell(&self) -> bool {
        matches!(self, RenderOp::SetCell { text, .. } if text.is_empty())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RenderOp {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RenderOp::SetCell { row, column, text } => {
                defmt::write!(f, "SetCell({}, {}, {})", row, column, text.as_str())
            }
            RenderOp::AppendLine { text, max_retained } => {
                defmt::write!(f, "AppendLine({}, max={})", text.as_str(), max_retained)
            }
            RenderOp::ClearLines => defmt::write!(f, "ClearLines"),
        }
    }
}

/// Apply a batch of operations and flush once
///
/// Stops at the first rejected operation.
pub fn apply_all<S: RenderSink + ?Sized>(ops: &[RenderOp], sink: &mut S) -> Result<(), RenderError> {
    for op in ops {
        op.apply(sink)?;
    }
    sink.flush()
}
