//! Error types for the tic-tac-toe Q-learning crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("cannot write a value into masked cell {position}")]
    MaskedCell { position: usize },

    #[error("no legal moves available")]
    NoLegalMove,

    #[error("game already over")]
    GameOver,

    #[error("board literal has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("unsupported Q-table format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },

    #[error("cannot infer Q-table format from path {path:?} (use .msgpack or .json)")]
    UnsupportedFormat { path: std::path::PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Whether this error came from loading or saving a Q-table
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Serialization(_)
                | Error::SerializationContext { .. }
                | Error::UnsupportedFormatVersion { .. }
                | Error::UnsupportedFormat { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
