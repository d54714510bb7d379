//! Error types for the cleaning pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the read, clean, and write stages
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed input {} (line {line}): {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    #[error("cannot convert `{value}` in column `{column}` (line {line}) to {target}")]
    Conversion {
        column: String,
        value: String,
        line: usize,
        target: &'static str,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
