//! Error types for board construction, the priority bucket and search runs.

use thiserror::Error;

/// Raised when a grid cannot be turned into a [`Board`](crate::board::Board).
#[derive(Debug, Error)]
pub enum BoardError {
    /// The grid has no rows.
    #[error("Board grid is empty")]
    Empty,

    /// A row does not have as many cells as the grid has rows.
    #[error("Board grid must be square: row {row} has {found} cells, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Number of rows in the grid.
        expected: usize,
        /// Number of cells found in the row.
        found: usize,
    },

    /// A random board was requested with more endpoint pairs than fit.
    #[error("Cannot place {colors} color pairs on a {size}x{size} board")]
    TooManyColors {
        /// Requested number of colors.
        colors: usize,
        /// Side length of the board.
        size: usize,
    },

    /// A token in a text grid is not a cell value.
    #[error("Unrecognized cell '{token}' in row {row} col {col}")]
    InvalidCell {
        /// Row of the token.
        row: usize,
        /// Column of the token.
        col: usize,
        /// The text that failed to parse.
        token: String,
    },

    /// A board file could not be read.
    #[error("Failed to read board file: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract violations of [`PriorityBucket`](crate::bucket::PriorityBucket).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// `dequeue` was called on an empty bucket.
    #[error("Priority bucket is empty")]
    Empty,
}

/// An unexpected failure inside a strategy run.
///
/// These never escape the solver entry points; they end up in
/// [`SearchOutcome::diagnostic`](crate::solver::SearchOutcome::diagnostic).
#[derive(Debug, Error)]
pub enum SolveFault {
    #[error("queue fault: {0}")]
    Queue(#[from] QueueError),

    #[error("search panicked: {0}")]
    Panicked(String),

    #[error("internal fault: {0}")]
    Internal(String),
}
