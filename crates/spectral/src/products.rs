//! Water-quality products computed from resampled reflectances.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Array3, ArrayView1, Axis, Zip};

use crate::error::SpectralError;
use crate::resample::FILL_VALUE;

/// Reflectances at or below this are treated as no signal.
const MIN_REFLECTANCE: f64 = 1e-10;

/// A per-pixel algorithm evaluated on a fixed set of target wavelengths.
pub trait WaterQualityAlgorithm {
    /// Short name used in output file names.
    fn name(&self) -> &'static str;

    /// Output file prefix, e.g. `chl`.
    fn product(&self) -> &'static str;

    /// Wavelengths (nm) the algorithm needs, in the order `pixel` reads them.
    fn bands(&self) -> &'static [f64];

    /// Evaluate one pixel. `spectrum[i]` is the reflectance at `bands()[i]`.
    fn pixel(&self, spectrum: ArrayView1<'_, f64>, fill_value: f64) -> f64;

    /// Evaluate every pixel of a `(rows, cols, bands().len())` array.
    fn evaluate(&self, resampled: &Array3<f64>, fill_value: f64) -> Array2<f64> {
        Zip::from(resampled.lanes(Axis(2))).map_collect(|spectrum| self.pixel(spectrum, fill_value))
    }
}

/// Chlorophyll-a algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChlorophyllAlgorithm {
    /// Gitelson et al. (2007) red-edge model, medium to high concentrations.
    Gitelson,
    /// OC4 maximum band ratio, low concentrations.
    Oc4,
}

/// Total suspended matter algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsmAlgorithm {
    /// Nechad et al. (2010) single band model at 710 nm.
    Nechad,
}

pub const GITELSON_BANDS: [f64; 3] = [675.0, 695.0, 730.0];
pub const OC4_BANDS: [f64; 4] = [443.0, 489.0, 510.0, 555.0];
pub const NECHAD_BANDS: [f64; 1] = [710.0];

impl WaterQualityAlgorithm for ChlorophyllAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::Gitelson => "git",
            Self::Oc4 => "oc4",
        }
    }

    fn product(&self) -> &'static str {
        "chl"
    }

    fn bands(&self) -> &'static [f64] {
        match self {
            Self::Gitelson => &GITELSON_BANDS,
            Self::Oc4 => &OC4_BANDS,
        }
    }

    fn pixel(&self, r: ArrayView1<'_, f64>, fill_value: f64) -> f64 {
        let value = match self {
            Self::Gitelson => gitelson(r[0], r[1], r[2]),
            Self::Oc4 => oc4v6(r[0], r[1], r[2], r[3]),
        };
        if value == FILL_VALUE {
            fill_value
        } else {
            value
        }
    }
}

impl WaterQualityAlgorithm for TsmAlgorithm {
    fn name(&self) -> &'static str {
        "nechad"
    }

    fn product(&self) -> &'static str {
        "tsm"
    }

    fn bands(&self) -> &'static [f64] {
        &NECHAD_BANDS
    }

    fn pixel(&self, r: ArrayView1<'_, f64>, fill_value: f64) -> f64 {
        let value = nechad_tsm(r[0]);
        if value == FILL_VALUE {
            fill_value
        } else {
            value
        }
    }
}

impl FromStr for ChlorophyllAlgorithm {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(Self::Gitelson),
            "oc4" => Ok(Self::Oc4),
            other => Err(SpectralError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl FromStr for TsmAlgorithm {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nechad" => Ok(Self::Nechad),
            other => Err(SpectralError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for ChlorophyllAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TsmAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gitelson chlorophyll-a from reflectances at 675, 695 and 730 nm.
pub fn gitelson(r675: f64, r695: f64, r730: f64) -> f64 {
    if !(r675 > MIN_REFLECTANCE && r695 > MIN_REFLECTANCE) {
        return FILL_VALUE;
    }
    10.14 + 178.9 * r730 * (1.0 / r675 - 1.0 / r695)
}

/// OC4 (version 6) chlorophyll-a from reflectances at 443, 489, 510 and 555 nm.
pub fn oc4v6(r443: f64, r489: f64, r510: f64, r555: f64) -> f64 {
    if !(r555 > MIN_REFLECTANCE) {
        return FILL_VALUE;
    }
    let ratio = r443.max(r489).max(r510) / r555;
    let x = ratio.log10();
    let p = 0.3272 - 2.9940 * x + 2.7218 * x.powi(2) - 1.2259 * x.powi(3) - 0.5683 * x.powi(4);
    10f64.powf(p)
}

/// Nechad total suspended matter (g/m³) from the scaled 710 nm value.
///
/// Input is reflectance scaled by 10000, as delivered by the atmospheric
/// correction.
pub fn nechad_tsm(r710: f64) -> f64 {
    const A: f64 = 561.94;
    const B: f64 = 1.23;
    const C: f64 = 0.1892;

    if !(r710 > MIN_REFLECTANCE) {
        return FILL_VALUE;
    }
    let rw = r710 * 0.0001;
    A * rw * (1.0 - rw / C) + B
}
