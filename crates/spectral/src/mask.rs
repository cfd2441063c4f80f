//! Land/water discrimination and mask application.

use ndarray::{Array2, Array3, ArrayView2, Axis, Zip};

use egads_common::ToolboxConfig;

use crate::bands::select_bands;
use crate::error::{SpectralError, SpectralResult};

/// Water detection from a single near-infrared band.
///
/// Water reflects very little around 875 nm while land reflects strongly,
/// so a pixel whose value exceeds `threshold` (or is not positive, i.e. no
/// data) is masked out of water products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterMask {
    /// Wavelength (nm) of the detection band.
    pub wavelength: f64,
    /// Values above this are treated as land.
    pub threshold: f64,
}

impl Default for WaterMask {
    fn default() -> Self {
        Self {
            wavelength: 875.0,
            threshold: 800.0,
        }
    }
}

impl WaterMask {
    pub fn new(wavelength: f64, threshold: f64) -> Self {
        Self {
            wavelength,
            threshold,
        }
    }

    pub fn from_config(config: &ToolboxConfig) -> Self {
        Self::new(config.water_mask_wavelength, config.water_mask_threshold)
    }

    /// Grid index of the detection band: the lower band bracketing
    /// `wavelength`.
    pub fn band_index(&self, grid: &[f64]) -> SpectralResult<usize> {
        select_bands(grid, &[self.wavelength])
            .indices
            .first()
            .copied()
            .ok_or_else(|| SpectralError::TargetsOutOfRange {
                targets: vec![self.wavelength],
            })
    }

    /// Mask (true = not water) computed from the detection band.
    pub fn classify(&self, band: ArrayView2<'_, f64>) -> Array2<bool> {
        let threshold = self.threshold;
        band.mapv(|v| v > threshold || v <= 0.0)
    }

    /// Mask computed from a full raster aligned to `grid`.
    pub fn compute(&self, grid: &[f64], raster: &Array3<f64>) -> SpectralResult<Array2<bool>> {
        let bands = raster.len_of(Axis(2));
        if bands != grid.len() {
            return Err(SpectralError::shape_mismatch(format!(
                "raster has {} bands but the grid has {} wavelengths",
                bands,
                grid.len()
            )));
        }
        let index = self.band_index(grid)?;
        Ok(self.classify(raster.index_axis(Axis(2), index)))
    }
}

/// Set every masked pixel of `product` to zero.
pub fn apply_mask(product: &Array2<f64>, mask: &Array2<bool>) -> SpectralResult<Array2<f64>> {
    if product.dim() != mask.dim() {
        return Err(SpectralError::shape_mismatch(format!(
            "product is {:?} but mask is {:?}",
            product.dim(),
            mask.dim()
        )));
    }

    Ok(Zip::from(product)
        .and(mask)
        .map_collect(|&v, &masked| if masked { 0.0 } else { v }))
}
