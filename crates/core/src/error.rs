use thiserror::Error;

/// Failures reported at the engine boundary.
///
/// Everything else (illegal moves, out-of-range virus coordinates, commands
/// without a faller) is a silent no-op rather than an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid field dimensions {rows}x{cols}: rows and cols must be positive")]
    InvalidDimension { rows: i32, cols: i32 },

    #[error("malformed field contents: {0}")]
    MalformedInput(#[from] Malformed),
}

/// Why a batch of field contents was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("expected {expected} rows, got {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} col {col}: unrecognized cell {ch:?}")]
    UnknownCell { row: usize, col: usize, ch: char },
}

pub type EngineResult<T> = Result<T, EngineError>;
