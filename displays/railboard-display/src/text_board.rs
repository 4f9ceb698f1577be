//! Character board buffer
//!
//! Provides a text-mode copy of the departure board that any panel driver
//! can render from. It also journals every operation it receives, which is
//! what the core's tests inspect.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::layout::{BoardLayout, Column};
use crate::sink::{ErrorSink, RenderError, RenderOp, RenderSink};

/// Maximum bytes stored per cell
pub const MAX_CELL_LEN: usize = 32;

type Cell = heapless::String<MAX_CELL_LEN>;

/// Text-mode departure board
#[derive(Debug, Clone)]
pub struct TextBoard {
    /// Column geometry (widths are used for clipping)
    layout: BoardLayout,
    /// Title line ("PAD -> RDG")
    title: String,
    /// Service rows, three cells each
    rows: Vec<[Cell; 3]>,
    /// Banner lines, oldest first
    lines: VecDeque<String>,
    /// Fatal error page, if one is showing
    fatal: Option<(String, String)>,
    /// Every operation received since the last `take_journal`
    journal: Vec<RenderOp>,
    /// Number of flushes
    flushes: u32,
    /// Whether content changed since the last flush
    dirty: bool,
}

impl TextBoard {
    /// Create a blank board with `rows` service rows
    pub fn new(rows: usize, layout: BoardLayout, title: &str) -> Self {
        Self {
            layout,
            title: String::from(title),
            rows: (0..rows).map(|_| Default::default()).collect(),
            lines: VecDeque::new(),
            fatal: None,
            journal: Vec::new(),
            flushes: 0,
            dirty: true,
        }
    }

    /// Title line
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Heading line for the service columns
    pub fn headings(&self) -> [&'static str; 3] {
        Column::ALL.map(|column| self.layout.column(column).heading)
    }

    /// Number of service rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Text currently in a cell
    pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
        self.rows.get(row).map(|cells| cells[column.index()].as_str())
    }

    /// Whether every cell of a row is blank
    pub fn row_is_blank(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map(|cells| cells.iter().all(|c| c.is_empty()))
            .unwrap_or(true)
    }

    /// Banner lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Fatal error page (context line, error text)
    pub fn fatal(&self) -> Option<(&str, &str)> {
        self.fatal.as_ref().map(|(c, e)| (c.as_str(), e.as_str()))
    }

    /// Operations received so far
    pub fn journal(&self) -> &[RenderOp] {
        &self.journal
    }

    /// Drain the operation journal
    pub fn take_journal(&mut self) -> Vec<RenderOp> {
        core::mem::take(&mut self.journal)
    }

    /// Number of flushes so far
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Check if the board changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn clip(&self, column: Column, text: &str) -> Cell {
        let width = usize::from(self.layout.column(column).width);
        let mut cell = Cell::new();
        for ch in text.chars().take(width) {
            if cell.push(ch).is_err() {
                break;
            }
        }
        cell
    }
}

impl RenderSink for TextBoard {
    fn set_cell(&mut self, row: usize, column: Column, text: &str) -> Result<(), RenderError> {
        if row >= self.rows.len() {
            return Err(RenderError::InvalidCoordinates);
        }
        let cell = self.clip(column, text);
        self.rows[row][column.index()] = cell;
        self.journal.push(RenderOp::SetCell {
            row,
            column,
            text: String::from(text),
        });
        self.dirty = true;
        Ok(())
    }

    fn append_line(&mut self, text: &str, max_retained_lines: usize) -> Result<(), RenderError> {
        self.lines.push_back(String::from(text));
        while self.lines.len() > max_retained_lines {
            self.lines.pop_front();
        }
        self.journal.push(RenderOp::AppendLine {
            text: String::from(text),
            max_retained: max_retained_lines,
        });
        self.dirty = true;
        Ok(())
    }

    fn clear_lines(&mut self) -> Result<(), RenderError> {
        self.lines.clear();
        self.journal.push(RenderOp::ClearLines);
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.flushes = self.flushes.saturating_add(1);
        self.dirty = false;
        Ok(())
    }
}

impl ErrorSink for TextBoard {
    fn show_fatal(&mut self, context_line: &str, error_text: &str) -> Result<(), RenderError> {
        for cells in &mut self.rows {
            for cell in cells.iter_mut() {
                cell.clear();
            }
        }
        self.lines.clear();
        self.fatal = Some((String::from(context_line), String::from(error_text)));
        self.flushes = self.flushes.saturating_add(1);
        self.dirty = false;
        Ok(())
    }
}
