//! Shared test utilities for the egads-rs workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Mock dataset handles and openers for the file-handle cache
//! - Fixture arrays with their expected bounded-transform outputs
//! - Synthetic spectral rasters and scratch descriptor directories
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, MockOpener};
//! ```

pub mod fixtures;
pub mod generators;
pub mod mock;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use mock::*;

/// Tolerance used by the float assertions when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert two floats agree within a tolerance ([`DEFAULT_TOLERANCE`] if omitted).
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(10.02, 10.0, 0.05);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr) => {
        $crate::assert_approx_eq!($actual, $expected, $crate::DEFAULT_TOLERANCE)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance): (f64, f64, f64) =
            ($actual as f64, $expected as f64, $tolerance as f64);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{} is not within {} of {}",
            actual,
            tolerance,
            expected
        );
    }};
}

/// Element-wise [`assert_approx_eq!`] over two slices of equal length.
///
/// ```
/// use test_utils::assert_all_approx_eq;
///
/// assert_all_approx_eq!(&[1.0, 2.0], &[1.0, 2.0 + 1e-12]);
/// ```
#[macro_export]
macro_rules! assert_all_approx_eq {
    ($actual:expr, $expected:expr) => {
        $crate::assert_all_approx_eq!($actual, $expected, $crate::DEFAULT_TOLERANCE)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: &[f64] = $actual;
        let expected: &[f64] = $expected;
        assert_eq!(actual.len(), expected.len(), "slices differ in length");
        for (a, e) in actual.iter().zip(expected.iter()) {
            $crate::assert_approx_eq!(*a, *e, $tolerance);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_within_tolerance() {
        assert_approx_eq!(0.1 + 0.2, 0.3);
        assert_approx_eq!(-5.5, -5.500001, 1e-4);
        assert_approx_eq!(1.5_f32, 1.5);
    }

    #[test]
    #[should_panic(expected = "is not within")]
    fn test_approx_eq_outside_tolerance() {
        assert_approx_eq!(1.1, 1.0, 1e-3);
    }

    #[test]
    fn test_all_approx_eq() {
        assert_all_approx_eq!(&[1.0001, 2.0001], &[1.0, 2.0], 1e-3);
    }

    #[test]
    #[should_panic(expected = "slices differ in length")]
    fn test_all_approx_eq_length_mismatch() {
        assert_all_approx_eq!(&[1.0], &[1.0, 2.0]);
    }
}
