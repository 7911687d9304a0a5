use thiserror::Error;

/// Input problems detected before a matching run starts.
///
/// Any of these aborts the run; no partial matching is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Score matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareScores { row: usize, len: usize, expected: usize },

    #[error("Invalid score at ({row}, {col}): {value} (scores must be finite and non-negative)")]
    InvalidScore { row: usize, col: usize, value: f64 },

    #[error("Expected {expected} {field}, got {len}")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("Unknown gender identity: {0:?}")]
    UnknownIdentity(String),

    #[error("Unknown gender preference: {0:?}")]
    UnknownPreference(String),

    #[error("Invalid partition: {0}")]
    InvalidPartition(String),
}
