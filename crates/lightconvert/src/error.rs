//! Error types for LightConvert
//!
//! Errors fall into three groups, and callers treat them differently:
//!
//! - configuration problems (missing path, unknown dataset, bad flag combination)
//!   are raised before any file is opened
//! - [`ConvertError::Unsupported`] means the dataset has no such relation; the
//!   entry point reports it and moves on to the next requested conversion
//! - everything else (I/O, CSV, schema) aborts the run
//!
//! Per-record parse problems never surface here; readers log and skip them.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::Relation;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// A required command-line argument was not supplied
    #[error("{0} can not be None, please specify the {0}")]
    MissingArgument(&'static str),

    /// Dataset name is not in the registry
    #[error("Unknown dataset '{0}'. Use names like 'ml-100k', 'ml-20m' or 'amazon_video_games'.")]
    UnknownDataset(String),

    /// Input path does not name a dataset the selected loader understands
    #[error("Invalid dataset '{dataset}': {reason}")]
    InvalidDataset { dataset: String, reason: String },

    /// Two options that cannot be combined
    #[error("Incompatible options: {0}")]
    IncompatibleOptions(String),

    /// The dataset does not provide the requested relation
    #[error("Dataset '{dataset}' can't be converted to {relation} file")]
    Unsupported { dataset: String, relation: Relation },

    /// Required input file is missing
    #[error("File not found: '{}'. Check the input path and the dataset's file layout.", .0.display())]
    FileNotFound(PathBuf),

    /// Table shape does not fit the field mapping
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Renaming the finished temporary file over the output failed
    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ConvertError {
    /// Create an invalid dataset error
    pub fn invalid_dataset(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Whether the error is a configuration problem detected before any I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_)
                | Self::UnknownDataset(_)
                | Self::InvalidDataset { .. }
                | Self::IncompatibleOptions(_)
        )
    }
}
