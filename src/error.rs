//! Unified error types.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level run error. Every variant fails the run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Coingecko token is required")]
    MissingCredential,

    #[error("File {} does not exist", .0.display())]
    BaselineMissing(PathBuf),

    #[error("Failed to read baseline {}: {source}", .path.display())]
    BaselineRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse baseline {}: {source}", .path.display())]
    BaselineParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("No coingecko token data found")]
    EmptyResult,

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Fragment directory errors. Only `ReadDir` is fatal; the per-file variants
/// are collected and reported while the scan continues.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Cannot list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file {file}: {source}")]
    ReadFile {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error processing file {file}: {source}")]
    ParseFile {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Failed after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Whether another attempt could succeed. Body decode and request-build
    /// failures are deterministic, so they are not retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Timeout(_) | HttpError::Status { .. } => true,
            HttpError::Reqwest(e) => !(e.is_decode() || e.is_builder()),
            HttpError::MaxRetriesExceeded { .. } => false,
        }
    }
}

/// CI output channel errors.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Failed to write output {name} to {}: {source}", .path.display())]
    Output {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
