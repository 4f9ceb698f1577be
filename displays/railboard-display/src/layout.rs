//! Board geometry
//!
//! Describes the fixed layout of the departure board: a title line, a
//! heading line, N service rows of three cells, and a free-form banner
//! below the rows.
//!
//! Pixel positions match a 400px wide panel with a 20px line font.

use alloc::string::String;

/// Cell within a service row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Column {
    /// Scheduled departure time ("14:32")
    Time,
    /// Destination station name
    Destination,
    /// Expected time or status ("On time", "Delayed")
    Expected,
}

impl Column {
    /// All columns, left to right
    pub const ALL: [Column; 3] = [Column::Time, Column::Destination, Column::Expected];

    /// Zero-based column index
    pub const fn index(self) -> usize {
        match self {
            Column::Time => 0,
            Column::Destination => 1,
            Column::Expected => 2,
        }
    }
}

/// Placement of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnSpec {
    /// Heading text
    pub heading: &'static str,
    /// Left edge in pixels
    pub x: u16,
    /// Width in characters
    pub width: u8,
}

/// Departure board layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardLayout {
    /// Column placements, indexed by [`Column::index`]
    pub columns: [ColumnSpec; 3],
    /// Height of one text line in pixels
    pub line_height: u16,
    /// Top edge of the banner area in pixels
    pub banner_y: u16,
    /// Banner width in characters
    pub banner_width: u8,
}

impl BoardLayout {
    /// Layout used by the reference 400x300 e-paper board
    pub const DEFAULT: BoardLayout = BoardLayout {
        columns: [
            // "00:00"
            ColumnSpec { heading: "Time", x: 0, width: 5 },
            // "Ashford International" is the longest station name served
            ColumnSpec { heading: "Destination", x: 90, width: 21 },
            // "Cancelled"
            ColumnSpec { heading: "Expt", x: 340, width: 9 },
        ],
        line_height: 20,
        banner_y: 160,
        banner_width: 34,
    };

    /// Placement of a column
    pub fn column(&self, column: Column) -> &ColumnSpec {
        &self.columns[column.index()]
    }

    /// Top edge of a service row in pixels
    ///
    /// Row 0 sits below the title and heading lines.
    pub fn row_y(&self, row: usize) -> u16 {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        self.line_height.saturating_mul(row.saturating_add(2))
    }

    /// Number of service rows that fit above the banner
    pub fn max_rows(&self) -> usize {
        if self.line_height == 0 {
            return 0;
        }
        usize::from((self.banner_y / self.line_height).saturating_sub(2))
    }

    /// Title line for a journey ("ORIGIN -> DEST")
    pub fn title(origin: &str, destination: &str) -> String {
        let mut title = String::with_capacity(origin.len() + destination.len() + 4);
        title.push_str(origin);
        title.push_str(" -> ");
        title.push_str(destination);
        title
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
