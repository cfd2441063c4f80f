//! End-to-end product generation: read, select, resample, compute, mask, write.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis, Zip};
use tracing::{debug, info};

use egads_common::{MaskedArray, ToolboxConfig};

use crate::bands::select_bands;
use crate::error::{SpectralError, SpectralResult};
use crate::io::{BandWriter, SpectralImageReader};
use crate::mask::{apply_mask, WaterMask};
use crate::products::{ChlorophyllAlgorithm, TsmAlgorithm, WaterQualityAlgorithm};
use crate::resample::interpolate_bands_with_fill;

/// Settings shared by every product run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductOptions {
    pub water_mask: WaterMask,
    /// Written where interpolation or the algorithm has no valid result.
    pub fill_value: f64,
    /// Sentinel of masked products.
    pub missing_value: f64,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self::from_config(&ToolboxConfig::default())
    }
}

impl ProductOptions {
    pub fn from_config(config: &ToolboxConfig) -> Self {
        Self {
            water_mask: WaterMask::from_config(config),
            fill_value: config.interpolation_fill_value,
            missing_value: config.missing_value,
        }
    }
}

/// Compute a product without writing it. Land pixels are set to 0.
///
/// Only the bands bracketing the algorithm's wavelengths (plus the water
/// detection band) are read from the image.
pub fn compute_product<R, A>(
    reader: &R,
    algorithm: &A,
    options: &ProductOptions,
) -> SpectralResult<Array2<f64>>
where
    R: SpectralImageReader + ?Sized,
    A: WaterQualityAlgorithm + ?Sized,
{
    let (product, land) = product_and_land(reader, algorithm, options)?;
    apply_mask(&product, &land)
}

/// Compute a product as a [`MaskedArray`].
///
/// Land pixels and pixels holding the fill value are missing, reported with
/// `options.missing_value`.
pub fn compute_masked_product<R, A>(
    reader: &R,
    algorithm: &A,
    options: &ProductOptions,
) -> SpectralResult<MaskedArray>
where
    R: SpectralImageReader + ?Sized,
    A: WaterQualityAlgorithm + ?Sized,
{
    let (product, land) = product_and_land(reader, algorithm, options)?;
    let fill = options.fill_value;
    let missing = Zip::from(&product)
        .and(&land)
        .map_collect(|&v, &is_land| is_land || v == fill);

    Ok(MaskedArray::new(
        product.into_dyn(),
        missing.into_dyn(),
        options.missing_value,
    )?)
}

fn product_and_land<R, A>(
    reader: &R,
    algorithm: &A,
    options: &ProductOptions,
) -> SpectralResult<(Array2<f64>, Array2<bool>)>
where
    R: SpectralImageReader + ?Sized,
    A: WaterQualityAlgorithm + ?Sized,
{
    let wavelengths = reader.wavelengths()?;
    let targets = algorithm.bands();

    let selection = select_bands(&wavelengths, targets);
    if selection.is_empty() {
        return Err(SpectralError::TargetsOutOfRange {
            targets: targets.to_vec(),
        });
    }
    debug!(
        algorithm = algorithm.name(),
        bands = ?selection.indices,
        "Selected bracketing bands"
    );

    let subraster = reader.read_bands(&selection.indices)?;
    let resampled =
        interpolate_bands_with_fill(&selection.values, &subraster, targets, options.fill_value)?;
    let product = algorithm.evaluate(&resampled, options.fill_value);

    let mask_band = options.water_mask.band_index(&wavelengths)?;
    let detection = reader.read_bands(&[mask_band])?;
    let land = options
        .water_mask
        .classify(detection.index_axis(Axis(2), 0));

    if land.dim() != product.dim() {
        return Err(SpectralError::shape_mismatch(format!(
            "product is {:?} but mask is {:?}",
            product.dim(),
            land.dim()
        )));
    }
    Ok((product, land))
}

/// Compute a product and write it as `<product>_<algorithm>_<source name>`
/// under `out_dir`. Returns the path written.
pub fn run_product<R, W, A>(
    reader: &R,
    writer: &mut W,
    out_dir: &Path,
    algorithm: &A,
    options: &ProductOptions,
) -> SpectralResult<PathBuf>
where
    R: SpectralImageReader + ?Sized,
    W: BandWriter + ?Sized,
    A: WaterQualityAlgorithm + ?Sized,
{
    let product = compute_product(reader, algorithm, options)?;
    let georef = reader.georeference()?;

    let file_name = format!(
        "{}_{}_{}",
        algorithm.product(),
        algorithm.name(),
        reader.source_name()
    );
    let path = writer.write_band(&out_dir.join(file_name), &product, &georef)?;

    info!(
        product = algorithm.product(),
        algorithm = algorithm.name(),
        path = %path.display(),
        "Product written"
    );
    Ok(path)
}

/// Chlorophyll-a product with default options.
pub fn chlorophyll_product<R, W>(
    reader: &R,
    writer: &mut W,
    out_dir: &Path,
    algorithm: ChlorophyllAlgorithm,
) -> SpectralResult<PathBuf>
where
    R: SpectralImageReader + ?Sized,
    W: BandWriter + ?Sized,
{
    run_product(reader, writer, out_dir, &algorithm, &ProductOptions::default())
}

/// Total suspended matter product with default options.
pub fn tsm_product<R, W>(
    reader: &R,
    writer: &mut W,
    out_dir: &Path,
    algorithm: TsmAlgorithm,
) -> SpectralResult<PathBuf>
where
    R: SpectralImageReader + ?Sized,
    W: BandWriter + ?Sized,
{
    run_product(reader, writer, out_dir, &algorithm, &ProductOptions::default())
}
