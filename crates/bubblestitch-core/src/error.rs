//! Error handling for Bubble Stitch
//!
//! Provides the error types shared by the workspace:
//! - Pattern errors (structural validation of loaded patterns)
//! - Serialization errors (persisted JSON form)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::model::ColorId;

/// Pattern validation error type
///
/// Raised when a pattern does not have the fixed grid shape or references
/// colors that are not in its palette. Patterns built by this crate never
/// fail validation; these errors come from persisted or hand-written data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern declares a row count other than the fixed one
    #[error("Pattern declares {actual} rows, expected {expected}")]
    TotalRows {
        /// The fixed row count.
        expected: usize,
        /// The declared row count.
        actual: usize,
    },

    /// The grid has the wrong number of rows
    #[error("Grid has {actual} rows, expected {expected}")]
    RowCount {
        /// The fixed row count.
        expected: usize,
        /// The number of rows found.
        actual: usize,
    },

    /// A grid row has the wrong number of cells
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowLength {
        /// The offending row.
        row: usize,
        /// The length required by row parity.
        expected: usize,
        /// The number of cells found.
        actual: usize,
    },

    /// The completed-rows flags do not cover every row
    #[error("Completed rows has {actual} entries, expected {expected}")]
    CompletedRowsLength {
        /// The fixed row count.
        expected: usize,
        /// The number of flags found.
        actual: usize,
    },

    /// The work cursor points past the last row
    #[error("Current row {row} is out of range (last row is {last})")]
    CurrentRowOutOfRange {
        /// The stored cursor.
        row: usize,
        /// The last valid row.
        last: usize,
    },

    /// Two palette entries share an id
    #[error("Duplicate palette color id {0}")]
    DuplicateColorId(ColorId),

    /// A cell references a color missing from the palette
    #[error("Cell ({row}, {col}) references unknown color {color_id}")]
    UnknownColor {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The dangling color id.
        color_id: ColorId,
    },
}

/// Main error type for Bubble Stitch
#[derive(Error, Debug)]
pub enum Error {
    /// Pattern validation error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from any message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type alias for Bubble Stitch operations.
pub type Result<T> = std::result::Result<T, Error>;
