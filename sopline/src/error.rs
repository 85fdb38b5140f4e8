//! Typed errors for input validation and batch execution.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoplineError {
    #[error("{key} not found in parameters file")]
    MissingRequiredKey { key: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidParameterValue { key: String, reason: String },

    #[error("Mapping file {path} has no header row")]
    EmptyMapping { path: PathBuf },

    #[error("Mapping file {path} line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Toolkit is not available: {0}")]
    ToolkitUnavailable(String),

    #[error("Failed to spawn command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Failed to read mapping file: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SoplineError>;
