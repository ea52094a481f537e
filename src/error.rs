// error.rs - Crate-wide error taxonomy

use thiserror::Error;

/// Main error type for tilegraph operations
#[derive(Error, Debug)]
pub enum TileGraphError {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unparsable input (bad record header, wrong token count, non-hex tokens)
    #[error("{path}:{line}: malformed input: {message}")]
    MalformedInput {
        path: String,
        line: usize,
        message: String,
    },

    /// Assembled sequence disagrees with the declared content hash
    #[error("content hash mismatch for tile {context}: declared {declared}, computed {computed}")]
    HashMismatch {
        context: String,
        declared: String,
        computed: String,
    },

    /// Tile sequence shorter than two anchors
    #[error("tile {context} is {len} bases, below the {min}-base minimum")]
    TileTooShort {
        context: String,
        len: usize,
        min: usize,
    },

    /// A segment hash expected in the Sequence table is absent; the table
    /// and the tile stream come from incompatible runs
    #[error("{kind} hash {hash} for tile {context} not found in Sequence table")]
    LookupMiss {
        kind: &'static str,
        hash: String,
        context: String,
    },

    /// Run manifest declares a different format or digest than this run
    #[error("incompatible run: {0}")]
    IncompatibleRun(String),

    /// Invalid command line arguments or configuration file
    #[error("configuration error: {0}")]
    Config(String),

    /// Violated internal invariant (e.g. emission before ranking)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Type alias for Results using TileGraphError
pub type Result<T> = std::result::Result<T, TileGraphError>;

impl TileGraphError {
    /// Create a malformed-input error with file position
    pub fn malformed(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
