//! Board state
//!
//! Remembers what the panel currently shows and turns each new snapshot into
//! the smallest list of draw operations that gets it there. E-paper redraws
//! are slow, so an unchanged board must cost nothing.
//!
//! # Banner
//!
//! The banner holds one remembered line. A delayed or cancelled service with
//! a reason produces `"<time>: <reason>"`; the first such line (in row
//! order) that differs from the remembered one is appended and remembered.
//! At most one delay line is appended per poll.

use alloc::string::String;
use alloc::vec::Vec;

use railboard_display::{apply_all, Column, RenderError, RenderOp, RenderSink};

use crate::config::BoardConfig;
use crate::model::Snapshot;

/// What the panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBoardState {
    row_values: Vec<[String; 3]>,
    banner_text: String,
    empty_notice_shown: bool,
}

impl RenderedBoardState {
    /// All rows blank, no banner
    pub fn new(rows: usize) -> Self {
        Self {
            row_values: (0..rows).map(|_| Default::default()).collect(),
            banner_text: String::new(),
            empty_notice_shown: false,
        }
    }

    /// Number of row slots (N)
    pub fn rows(&self) -> usize {
        self.row_values.len()
    }

    /// Cell text last written to a row
    pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
        self.row_values
            .get(row)
            .map(|cells| cells[column.index()].as_str())
    }

    /// Whether a row shows nothing
    pub fn row_is_blank(&self, row: usize) -> bool {
        self.row_values
            .get(row)
            .map_or(true, |cells| cells.iter().all(String::is_empty))
    }

    /// Last banner line appended by the board
    pub fn banner_text(&self) -> &str {
        &self.banner_text
    }

    /// Whether the no-services notice is showing
    pub fn empty_notice_shown(&self) -> bool {
        self.empty_notice_shown
    }
}

/// Snapshot-to-panel diffing
#[derive(Debug, Clone)]
pub struct BoardState {
    rendered: RenderedBoardState,
    no_services: String,
    banner_lines: usize,
}

impl BoardState {
    /// Blank board with `rows` slots
    ///
    /// - `no_services`: Banner text for a journey without services
    /// - `banner_lines`: Banner lines the panel keeps
    pub fn new(rows: usize, no_services: &str, banner_lines: usize) -> Self {
        Self {
            rendered: RenderedBoardState::new(rows),
            no_services: String::from(no_services),
            banner_lines,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            config.rows,
            &config.messages.no_services,
            config.messages.banner_lines,
        )
    }

    /// What the panel currently shows
    pub fn rendered(&self) -> &RenderedBoardState {
        &self.rendered
    }

    /// Move to a new snapshot, returning only the operations that change
    /// what is visible
    pub fn apply(&mut self, snapshot: &Snapshot) -> Vec<RenderOp> {
        let mut ops = Vec::new();

        if !snapshot.has_data() {
            if self.rendered.empty_notice_shown {
                return ops;
            }
            let text = snapshot
                .notice()
                .filter(|n| !n.is_empty())
                .unwrap_or(self.no_services.as_str());
            ops.push(RenderOp::AppendLine {
                text: String::from(text),
                max_retained: self.banner_lines,
            });
            self.rendered.banner_text = String::from(text);
            self.rendered.empty_notice_shown = true;
            for row in 0..self.rendered.rows() {
                self.blank_row(row, &mut ops);
            }
            return ops;
        }

        if self.rendered.empty_notice_shown {
            // Services are back; the notice no longer applies
            ops.push(RenderOp::ClearLines);
            self.rendered.banner_text.clear();
            self.rendered.empty_notice_shown = false;
        }

        let entries = snapshot.entries();
        for row in 0..self.rendered.rows() {
            let Some(entry) = entries.get(row) else {
                self.blank_row(row, &mut ops);
                continue;
            };
            let cells = &mut self.rendered.row_values[row];
            for column in Column::ALL {
                let text = entry.cell(column);
                let cell = &mut cells[column.index()];
                if cell.as_str() != text {
                    ops.push(RenderOp::SetCell {
                        row,
                        column,
                        text: String::from(text),
                    });
                    cell.clear();
                    cell.push_str(text);
                }
            }
        }

        let banner = entries
            .iter()
            .take(self.rendered.rows())
            .filter_map(|entry| entry.banner_text())
            .find(|text| *text != self.rendered.banner_text);
        if let Some(text) = banner {
            ops.push(RenderOp::AppendLine {
                text: text.clone(),
                max_retained: self.banner_lines,
            });
            self.rendered.banner_text = text;
        }

        ops
    }

    /// Apply a snapshot and draw the changes
    ///
    /// Flushes once if anything changed; an unchanged board is not touched.
    /// Returns the number of operations drawn.
    pub fn render<S: RenderSink + ?Sized>(
        &mut self,
        snapshot: &Snapshot,
        sink: &mut S,
    ) -> Result<usize, RenderError> {
        let ops = self.apply(snapshot);
        if ops.is_empty() {
            return Ok(0);
        }
        apply_all(&ops, sink)?;
        Ok(ops.len())
    }

    fn blank_row(&mut self, row: usize, ops: &mut Vec<RenderOp>) {
        if self.rendered.row_is_blank(row) {
            return;
        }
        for column in Column::ALL {
            ops.push(RenderOp::SetCell {
                row,
                column,
                text: String::new(),
            });
        }
        self.rendered.row_values[row] = Default::default();
    }
}
