//! Error types.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GtdPrepError {
    #[error("Wrapped anyhow error: {0}")]
    AnyhowError(#[from] anyhow::Error),
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
    #[error("{} is not valid {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("Missing columns in input header: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Wrapped polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, GtdPrepError>;
