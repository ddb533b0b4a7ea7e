//! Error types for `MaxRank`.
//!
//! Every failure aborts the whole batch: there is no per-query recovery.
//! Error codes follow the pattern `MAXRANK-XXX` so that log lines and exit
//! messages can be grepped.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for `MaxRank` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure class, used by the CLI to pick a message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable or malformed input files.
    Input,
    /// A requested query id is absent from the dataset.
    Lookup,
    /// A ranking strategy failed on its input.
    Strategy,
    /// Summary statistics over an empty result table.
    Aggregation,
    /// Invalid run configuration or method selector.
    Config,
}

/// Errors that can occur while running a `MaxRank` batch.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (MAXRANK-001).
    #[error("[MAXRANK-001] IO error on '{path}': {source}")]
    Io {
        /// File being read or written.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// CSV reader or writer error (MAXRANK-002).
    #[error("[MAXRANK-002] CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed input row (MAXRANK-003).
    #[error("[MAXRANK-003] Malformed row {row}: {message}")]
    MalformedRow {
        /// 1-based data row (header excluded).
        row: usize,
        /// What is wrong with the row.
        message: String,
    },

    /// Rows disagree on coordinate count (MAXRANK-004).
    #[error("[MAXRANK-004] Dimension mismatch at row {row}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// 1-based data row (header excluded).
        row: usize,
        /// Dimension of the dataset.
        expected: usize,
        /// Dimension found on the row.
        actual: usize,
    },

    /// Identifier appears twice in the dataset (MAXRANK-005).
    #[error("[MAXRANK-005] Duplicate point id '{0}'")]
    DuplicateId(String),

    /// Row without identifier (MAXRANK-006).
    #[error("[MAXRANK-006] Missing id on row {0}")]
    MissingId(usize),

    /// Dataset dimensionality no strategy handles (MAXRANK-007).
    #[error("[MAXRANK-007] Unsupported dimensionality {0}: at least 2 attributes are required")]
    UnsupportedDimension(usize),

    /// Requested query id is not in the dataset (MAXRANK-008).
    #[error("[MAXRANK-008] Query id '{0}' not found in dataset")]
    QueryNotFound(String),

    /// Method selector not recognised under strict parsing (MAXRANK-009).
    #[error("[MAXRANK-009] Unknown method '{0}': expected 'exact-high-dim' or 'approximate-high-dim'")]
    UnknownMethod(String),

    /// Ranking strategy failure (MAXRANK-010).
    #[error("[MAXRANK-010] Strategy '{strategy}' failed: {message}")]
    Strategy {
        /// Strategy name.
        strategy: &'static str,
        /// Failure description.
        message: String,
    },

    /// Summary statistics requested over no results (MAXRANK-011).
    #[error("[MAXRANK-011] Cannot compute rank statistics: no query was processed")]
    EmptyResults,

    /// Configuration error (MAXRANK-012).
    #[error("[MAXRANK-012] Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error (MAXRANK-013).
    #[error("[MAXRANK-013] Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an IO error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Builds a strategy failure.
    pub fn strategy(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::Strategy {
            strategy,
            message: message.into(),
        }
    }

    /// Returns the error code (e.g., "MAXRANK-008").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "MAXRANK-001",
            Self::Csv(_) => "MAXRANK-002",
            Self::MalformedRow { .. } => "MAXRANK-003",
            Self::DimensionMismatch { .. } => "MAXRANK-004",
            Self::DuplicateId(_) => "MAXRANK-005",
            Self::MissingId(_) => "MAXRANK-006",
            Self::UnsupportedDimension(_) => "MAXRANK-007",
            Self::QueryNotFound(_) => "MAXRANK-008",
            Self::UnknownMethod(_) => "MAXRANK-009",
            Self::Strategy { .. } => "MAXRANK-010",
            Self::EmptyResults => "MAXRANK-011",
            Self::Config(_) => "MAXRANK-012",
            Self::Serialization(_) => "MAXRANK-013",
        }
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. }
            | Self::Csv(_)
            | Self::MalformedRow { .. }
            | Self::DimensionMismatch { .. }
            | Self::DuplicateId(_)
            | Self::MissingId(_)
            | Self::Serialization(_) => ErrorKind::Input,
            Self::QueryNotFound(_) => ErrorKind::Lookup,
            Self::Strategy { .. } => ErrorKind::Strategy,
            Self::EmptyResults => ErrorKind::Aggregation,
            Self::UnsupportedDimension(_) | Self::UnknownMethod(_) | Self::Config(_) => {
                ErrorKind::Config
            }
        }
    }
}
