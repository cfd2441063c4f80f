//! Error types for spectral processing.

use egads_common::CommonError;
use thiserror::Error;

/// Result type for spectral operations.
pub type SpectralResult<T> = Result<T, SpectralError>;

/// Errors that can occur while selecting, resampling or writing bands.
#[derive(Error, Debug)]
pub enum SpectralError {
    /// Algorithm name outside the recognised set.
    #[error("unknown algorithm name: {0}")]
    UnknownAlgorithm(String),

    /// At least one target wavelength has no bracketing bands.
    #[error("target wavelengths {targets:?} are not all within the band grid")]
    TargetsOutOfRange { targets: Vec<f64> },

    /// Wavelength grid is empty, unsorted or non-finite.
    #[error("invalid wavelength grid: {0}")]
    InvalidGrid(String),

    /// Array dimensions do not line up.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Image metadata could not be interpreted.
    #[error("invalid image metadata: {0}")]
    InvalidMetadata(String),

    /// Failed to read or write an image file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building a masked product failed.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl SpectralError {
    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}
