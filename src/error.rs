//! Error types for strand version suggestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::RemoteFailure;

/// Errors while loading the proposed schema from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Errors while asking the Strands API for a version suggestion.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The service answered but rejected the suggestion.
    #[error("version suggestion rejected: {0}")]
    Remote(RemoteFailure),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },

    #[error("cannot encode schema: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SuggestError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SuggestError::Remote(_) => 1,
            SuggestError::Encode(_) => 2,
            SuggestError::Transport { .. } | SuggestError::UnexpectedResponse { .. } => 3,
        }
    }

    /// Whether the service itself rejected the request.
    pub fn is_remote(&self) -> bool {
        matches!(self, SuggestError::Remote(_))
    }
}
