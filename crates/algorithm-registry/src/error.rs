//! Error types for the algorithm registry.

use std::path::PathBuf;

use egads_common::CommonError;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("unknown algorithm name: {0}")]
    UnknownAlgorithm(String),

    #[error("algorithm already registered: {0}")]
    Duplicate(String),

    /// Wrong number of inputs passed to `run`.
    #[error("{name} expects {expected} inputs, got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Inputs that cannot be combined, e.g. differing lengths.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("descriptor {path}: unknown kernel '{kernel}'")]
    UnknownKernel { path: PathBuf, kernel: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl RegistryError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
