//! Error types for productive-table.

use std::path::PathBuf;

/// Result type alias for productive-table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or rendering a table.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The source reported a cell role tag that is not part of the closed
    /// role set.
    #[error("Unrecognized cell role '{tag}' at ({row}, {col})")]
    Decode {
        /// Source row of the offending cell.
        row: usize,
        /// Source column of the offending cell.
        col: usize,
        /// The raw tag as reported by the source.
        tag: String,
    },

    /// The source tagged a cell with a role that contradicts its position.
    #[error("Cell ({row}, {col}) is tagged '{found}' but its position makes it '{expected}'")]
    RoleMismatch {
        /// Source row of the offending cell.
        row: usize,
        /// Source column of the offending cell.
        col: usize,
        /// Role implied by the table layout.
        expected: &'static str,
        /// Role reported by the source.
        found: &'static str,
    },

    /// A data row does not line up with the header row.
    #[error("Shape mismatch: header has {header} columns, data row {row} has {len}")]
    ShapeMismatch {
        /// Number of decoded header cells.
        header: usize,
        /// Source row index of the mismatching data row.
        row: usize,
        /// Number of decoded cells in that row.
        len: usize,
    },

    /// Cell address outside of the table.
    #[error("Cell ({row}, {col}) out of bounds for table with {rows} rows and {columns} columns")]
    CellOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Total row count.
        rows: usize,
        /// Total column count.
        columns: usize,
    },

    /// The parts of a table do not fit together.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Selection refers to rows that do not exist.
    #[error("Invalid selection: row {row} out of range for {data_rows} data rows")]
    InvalidSelection {
        /// Offending row identifier.
        row: usize,
        /// Number of data rows in the current table.
        data_rows: usize,
    },

    /// An operation needs a rendered configuration but none is loaded.
    #[error("No table configuration has been rendered")]
    NotRendered,

    /// I/O error during file or stream operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error while reading IPC payloads.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON error in host configuration or messages.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 error in an encoded Arrow payload.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create an unrecognized role error.
    pub fn decode(row: usize, col: usize, tag: impl Into<String>) -> Self {
        Self::Decode {
            row,
            col,
            tag: tag.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error stems from corrupted cell metadata rather than
    /// from the environment.
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::RoleMismatch { .. } | Self::ShapeMismatch { .. }
        )
    }
}
