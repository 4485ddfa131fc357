use std::path::PathBuf;

/// Alias for `Result<T, HistoryError>`.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised while reading or persisting the selection history.
///
/// None of these abort a run: a failed load degrades to an empty history and
/// a failed save only means the history does not reflect this run.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The history file exists but could not be read.
    #[error("cannot read history file {}: {source}", path.display())]
    Read {
        /// Path of the history file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The history file is not valid history JSON.
    #[error("history file {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Path of the history file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The history file could not be written.
    #[error("cannot write history file {}: {source}", path.display())]
    Write {
        /// Path of the history file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The history could not be serialized.
    #[error("cannot serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A store refused the write for a reason of its own.
    #[error("history store rejected write: {0}")]
    Rejected(String),
}
