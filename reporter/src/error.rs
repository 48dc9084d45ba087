//! Error handling for the dashboard report

use std::path::PathBuf;
use thiserror::Error;

/// Report error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {resource} snapshot: {source}")]
    SnapshotFormat {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {resource} snapshot: expected a JSON array or a paginated object")]
    SnapshotShape { resource: &'static str },

    // Output errors
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable code for log fields
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::SnapshotRead { .. } => "SNAPSHOT_READ_ERROR",
            AppError::SnapshotFormat { .. } | AppError::SnapshotShape { .. } => {
                "SNAPSHOT_FORMAT_ERROR"
            }
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias for report operations
pub type AppResult<T> = Result<T, AppError>;
