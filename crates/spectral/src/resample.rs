//! Linear resampling of spectral rasters onto target wavelengths.
//!
//! Rasters are `(rows, cols, bands)` arrays. Interpolation runs along the
//! band axis between neighbouring samples only: no smoothing and no
//! extrapolation. Targets outside the sampled range get a fill value.

use ndarray::{Array3, Axis, Zip};

use crate::bands::select_bands;
use crate::error::{SpectralError, SpectralResult};

/// Value written where a target cannot be interpolated.
pub const FILL_VALUE: f64 = -9999.0;

/// Resample `raster` (aligned to `grid`) onto `targets`.
///
/// Only the bands bracketing the targets are used. The output has shape
/// `(rows, cols, targets.len())`.
pub fn resample(grid: &[f64], raster: &Array3<f64>, targets: &[f64]) -> SpectralResult<Array3<f64>> {
    validate_grid(grid)?;

    let (rows, cols, bands) = raster.dim();
    if bands != grid.len() {
        return Err(SpectralError::shape_mismatch(format!(
            "raster has {} bands but the grid has {} wavelengths",
            bands,
            grid.len()
        )));
    }

    if targets.is_empty() {
        return Ok(Array3::zeros((rows, cols, 0)));
    }

    let selection = select_bands(grid, targets);
    if selection.is_empty() {
        return Err(SpectralError::TargetsOutOfRange {
            targets: targets.to_vec(),
        });
    }

    let subraster = raster.select(Axis(2), &selection.indices);
    interpolate_bands(&selection.values, &subraster, targets)
}

/// Linearly interpolate `subraster` (one band per entry of `values`) at
/// each target, writing [`FILL_VALUE`] outside `[values[0], values[last]]`.
pub fn interpolate_bands(
    values: &[f64],
    subraster: &Array3<f64>,
    targets: &[f64],
) -> SpectralResult<Array3<f64>> {
    interpolate_bands_with_fill(values, subraster, targets, FILL_VALUE)
}

/// [`interpolate_bands`] with a caller-chosen fill value.
pub fn interpolate_bands_with_fill(
    values: &[f64],
    subraster: &Array3<f64>,
    targets: &[f64],
    fill_value: f64,
) -> SpectralResult<Array3<f64>> {
    validate_grid(values)?;

    let (rows, cols, bands) = subraster.dim();
    if bands != values.len() {
        return Err(SpectralError::shape_mismatch(format!(
            "sub-raster has {} bands but {} wavelengths were given",
            bands,
            values.len()
        )));
    }

    let mut out = Array3::from_elem((rows, cols, targets.len()), fill_value);

    for (t, &target) in targets.iter().enumerate() {
        let Some((lower, weight)) = locate(values, target) else {
            continue;
        };

        let mut plane = out.index_axis_mut(Axis(2), t);
        let below = subraster.index_axis(Axis(2), lower);

        if weight == 0.0 {
            plane.assign(&below);
            continue;
        }

        let above = subraster.index_axis(Axis(2), lower + 1);
        Zip::from(&mut plane)
            .and(&below)
            .and(&above)
            .for_each(|o, &a, &b| *o = a * (1.0 - weight) + b * weight);
    }

    Ok(out)
}

/// Lower sample index and fractional weight of `target` within `values`.
fn locate(values: &[f64], target: f64) -> Option<(usize, f64)> {
    let first = *values.first()?;
    let last = *values.last()?;
    if !(first <= target && target <= last) {
        return None;
    }

    if values.len() == 1 {
        return Some((0, 0.0));
    }

    let lower = values
        .windows(2)
        .position(|pair| pair[0] <= target && target <= pair[1])?;
    let (x0, x1) = (values[lower], values[lower + 1]);
    if target == x1 {
        return Some((lower + 1, 0.0));
    }
    Some((lower, (target - x0) / (x1 - x0)))
}

/// Wavelength grids must be non-empty, finite and strictly increasing.
fn validate_grid(grid: &[f64]) -> SpectralResult<()> {
    if grid.is_empty() {
        return Err(SpectralError::invalid_grid("no wavelengths"));
    }
    if let Some(bad) = grid.iter().find(|w| !w.is_finite()) {
        return Err(SpectralError::invalid_grid(format!(
            "non-finite wavelength {}",
            bad
        )));
    }
    if let Some(i) = grid.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(SpectralError::invalid_grid(format!(
            "wavelengths not strictly increasing at index {} ({} >= {})",
            i,
            grid[i],
            grid[i + 1]
        )));
    }
    Ok(())
}
