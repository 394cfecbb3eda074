//! Error types for checkpoint loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a probe checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Checkpoint path does not exist
    #[error("Checkpoint not found: {path}")]
    NotFound { path: PathBuf },

    /// Container could not be parsed
    #[error("Corrupt checkpoint {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// A required tensor or metadata entry is absent
    #[error("Checkpoint {path} is missing required key '{key}'")]
    MissingKey { path: PathBuf, key: String },

    /// A metadata entry exists but does not have the expected structure
    #[error("Invalid checkpoint metadata field '{field}': {message}")]
    Metadata { field: String, message: String },

    /// A tensor does not have the rank the probe layout requires
    #[error("Tensor '{tensor}' has shape {shape:?}, expected a rank-2 weight matrix")]
    BadShape { tensor: String, shape: Vec<usize> },

    /// SafeTensors serialization failed
    #[error("SafeTensors serialization failed: {message}")]
    Serialization { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
