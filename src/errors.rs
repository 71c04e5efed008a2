use std::io;

use thiserror::Error;

/// Error type for configuration, generation, export, and profiling failures.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Lookup into a configured table found no entry.
    #[error("no '{key}' entry in the {table} table")]
    MissingMapping { table: &'static str, key: String },
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// CSV read or write failure.
    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),
    /// JSON read or write failure.
    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthError {
    pub(crate) fn missing(table: &'static str, key: impl Into<String>) -> Self {
        SynthError::MissingMapping {
            table,
            key: key.into(),
        }
    }
}
