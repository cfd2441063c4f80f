//! Error types for axis and bounds operations.

use thiserror::Error;

/// Result type for grid utility operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised by the bounds resolver and bounded-value transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The bounds list violates its orientation or gap invariants.
    #[error("structural bounds error: {0}")]
    StructuralBounds(String),

    /// The coordinate lies outside every cell and limits were not requested.
    #[error("value {value} lies outside bounds range")]
    OutOfRange { value: f64 },

    /// A periodic axis needs a positive, finite modulus.
    #[error("invalid modulo {0}: must be positive and finite")]
    InvalidModulo(f64),

    /// Unrecognised restriction mode name.
    #[error("unknown restriction mode '{0}' (expected 'missing' or 'bound')")]
    InvalidMode(String),
}

impl GridError {
    /// Create a StructuralBounds error.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::StructuralBounds(msg.into())
    }
}
