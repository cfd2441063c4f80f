//! Error types shared by the toolbox crates.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("shape mismatch: data {data:?} vs mask {mask:?}")]
    ShapeMismatch { data: Vec<usize>, mask: Vec<usize> },

    #[error("cannot build array: {0}")]
    InvalidShape(String),

    #[error("cannot parse '{value}' with format '{format}'")]
    TimeParse { value: String, format: String },

    #[error("cannot match date time string: {0}")]
    InvalidDateTime(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommonError {
    pub fn shape_mismatch(data: &[usize], mask: &[usize]) -> Self {
        Self::ShapeMismatch {
            data: data.to_vec(),
            mask: mask.to_vec(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<serde_yaml::Error> for CommonError {
    fn from(err: serde_yaml::Error) -> Self {
        CommonError::ConfigError(format!("YAML error: {}", err))
    }
}

impl From<ndarray::ShapeError> for CommonError {
    fn from(err: ndarray::ShapeError) -> Self {
        CommonError::InvalidShape(err.to_string())
    }
}
