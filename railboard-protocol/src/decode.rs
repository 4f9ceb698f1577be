//! Body decoding
//!
//! Turns a captured response body into a [`DepartureBoard`]. The body is
//! borrowed; the caller decides when to release it.

use crate::board::DepartureBoard;

/// Class of decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeErrorKind {
    /// Body ended early (truncated transfer)
    Truncated,
    /// Body is not well-formed JSON
    Syntax,
    /// JSON is well-formed but has the wrong shape
    Data,
}

/// Decode failure with position in the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeError {
    /// Failure class
    pub kind: DecodeErrorKind,
    /// 1-based line of the failure (0 if unknown)
    pub line: usize,
    /// 1-based column of the failure (0 if unknown)
    pub column: usize,
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        let kind = match e.classify() {
            serde_json::error::Category::Eof => DecodeErrorKind::Truncated,
            serde_json::error::Category::Syntax => DecodeErrorKind::Syntax,
            serde_json::error::Category::Data | serde_json::error::Category::Io => {
                DecodeErrorKind::Data
            }
        };
        DecodeError {
            kind,
            line: e.line(),
            column: e.column(),
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            DecodeErrorKind::Truncated => "truncated body",
            DecodeErrorKind::Syntax => "malformed body",
            DecodeErrorKind::Data => "unexpected body shape",
        };
        write!(f, "{} at {}:{}", what, self.line, self.column)
    }
}

/// Decode a departure board body
pub fn decode(body: &[u8]) -> Result<DepartureBoard, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}
