//! Error taxonomy for the dashboard core.
//!
//! [`LoadError`] is fatal at startup: without a dataset there is no
//! dashboard. [`FilterError`] is recovered locally by the session, which
//! keeps its previous selection.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dataset loading
// ---------------------------------------------------------------------------

/// Failure to produce a [`crate::dataset::Dataset`] from a source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file does not exist.
    #[error("dataset not found: {path}")]
    NotFound { path: PathBuf },
    /// The dataset file exists but could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source is not well-formed CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is absent from the header row.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },
    /// A cell in a required column could not be interpreted.
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    /// The source parsed but holds no launch records.
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Filter mutation
// ---------------------------------------------------------------------------

/// A rejected filter event. The filter state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown launch site '{0}'")]
    InvalidSite(String),
    #[error("invalid payload range [{low}, {high}]: bounds must be finite with low <= high")]
    InvalidRange { low: f64, high: f64 },
}
