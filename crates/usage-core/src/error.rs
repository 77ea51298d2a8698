use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried by [`UsageError::IoFailure`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All hard errors produced while loading and analyzing host usage data.
#[derive(Error, Debug)]
pub enum UsageError {
    /// A required input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The monitoring data file has an extension with no registered reader.
    #[error("Unsupported file format: {0}. Please use .xlsx or .csv")]
    UnsupportedFormat(String),

    /// One or more required columns are absent from the monitoring table.
    #[error("Missing required columns: {}", .missing.join(", "))]
    SchemaViolation { missing: Vec<String> },

    /// Any other read or parse failure.
    #[error("Failed to read {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },

    /// A configuration file or threshold value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl UsageError {
    /// Wrap any error as an [`UsageError::IoFailure`] for `path`.
    pub fn io_failure(path: impl Into<PathBuf>, source: impl Into<BoxedCause>) -> Self {
        UsageError::IoFailure {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Convenience alias used throughout the usage crates.
pub type Result<T> = std::result::Result<T, UsageError>;
