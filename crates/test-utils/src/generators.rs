//! Test data generators for synthetic spectral and scratch-file data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use std::fs;
use std::io;

use ndarray::Array3;
use tempfile::TempDir;

/// Value of [`linear_spectral_raster`] at a pixel and wavelength.
///
/// Each pixel's spectrum is a straight line: `(row + 1) * 10 + (col + 1) * 0.01 * wavelength`.
/// Linear interpolation reproduces it exactly at any wavelength.
pub fn linear_value(row: usize, col: usize, wavelength: f64) -> f64 {
    (row + 1) as f64 * 10.0 + (col + 1) as f64 * 0.01 * wavelength
}

/// Creates a `(rows, cols, grid.len())` raster of linear spectra.
///
/// # Example
///
/// ```
/// use test_utils::{linear_spectral_raster, linear_value};
///
/// let raster = linear_spectral_raster(2, 3, &[400.0, 500.0]);
/// assert_eq!(raster.dim(), (2, 3, 2));
/// assert_eq!(raster[[1, 2, 0]], linear_value(1, 2, 400.0));
/// ```
pub fn linear_spectral_raster(rows: usize, cols: usize, grid: &[f64]) -> Array3<f64> {
    Array3::from_shape_fn((rows, cols, grid.len()), |(r, c, k)| {
        linear_value(r, c, grid[k])
    })
}

/// Creates a raster where every pixel carries the same spectrum `f(wavelength)`.
pub fn uniform_spectral_raster<F>(rows: usize, cols: usize, grid: &[f64], f: F) -> Array3<f64>
where
    F: Fn(f64) -> f64,
{
    Array3::from_shape_fn((rows, cols, grid.len()), |(_, _, k)| f(grid[k]))
}

/// Evenly spaced sample times starting at zero.
pub fn time_axis(len: usize, step: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 * step).collect()
}

/// Creates a scratch directory holding the given `(relative path, contents)` files.
///
/// Parent directories are created as needed. The directory is removed when
/// the returned [`TempDir`] is dropped.
pub fn scratch_dir(files: &[(&str, &str)]) -> io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    Ok(dir)
}
