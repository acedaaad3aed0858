//! Error types for IAT Flux

use thiserror::Error;

/// Errors that can occur during scoring
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Malformed trial log: {0}")]
    MalformedLog(String),

    #[error("Invalid trial log CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Trial log has no trials left after filtering")]
    EmptyTrialLog,

    #[error("Degenerate block group: {0}")]
    DegenerateGroup(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid height selection: {0}")]
    InvalidHeight(String),

    #[error("Invalid weight selection: {0}")]
    InvalidWeight(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
