//! Error types for the file-handle cache.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A handle that reported an error while being closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Errors that can occur while managing cached handles.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Tried to close a path the cache does not hold.
    #[error("path '{}' not in cached files so cannot close", .0.display())]
    NotCached(PathBuf),

    /// The opener failed; nothing was cached for this path.
    #[error("failed to open '{}': {message}", .path.display())]
    OpenFailed { path: PathBuf, message: String },

    /// The handle's close action failed. The entry is gone regardless.
    #[error("failed to close '{}': {message}", .path.display())]
    CloseFailed { path: PathBuf, message: String },

    /// Some handles failed to close during `close_all`.
    #[error("{} file handle(s) failed to close", .0.len())]
    CloseAllFailed(Vec<CloseFailure>),

    /// Cache limits must be positive.
    #[error("invalid cache limit {0}: must be > 0")]
    InvalidLimit(usize),

    /// Unrecognised open mode string.
    #[error("unknown open mode '{0}' (expected r, w, a or r+)")]
    InvalidMode(String),
}

impl CacheError {
    /// Create a CloseFailed error.
    pub fn close_failed(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        Self::CloseFailed {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Create an OpenFailed error.
    pub fn open_failed(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        Self::OpenFailed {
            path: path.into(),
            message: msg.to_string(),
        }
    }
}
