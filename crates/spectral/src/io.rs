//! Image input and band output.
//!
//! Readers hand the pipeline a `(rows, cols, bands)` raster, its band
//! wavelengths and a georeference; writers store a single product band and
//! must echo the georeference unchanged.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::{BufMut, BytesMut};
use ndarray::{Array2, Array3, Axis};
use tracing::info;

use crate::error::{SpectralError, SpectralResult};

/// Affine pixel-to-map transform plus projection description.
///
/// `transform` follows the usual six-coefficient layout:
/// `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoReference {
    pub transform: [f64; 6],
    pub projection: String,
}

impl Default for GeoReference {
    fn default() -> Self {
        Self {
            transform: [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            projection: String::new(),
        }
    }
}

/// Source of spectral imagery.
pub trait SpectralImageReader {
    /// File name of the image, used to name products.
    fn source_name(&self) -> String;

    /// Full `(rows, cols, bands)` raster.
    fn raster(&self) -> SpectralResult<Array3<f64>>;

    /// Centre wavelength (nm) of every band, ascending.
    fn wavelengths(&self) -> SpectralResult<Vec<f64>>;

    fn georeference(&self) -> SpectralResult<GeoReference>;

    /// Raster restricted to the given band indices, in the given order.
    fn read_bands(&self, indices: &[usize]) -> SpectralResult<Array3<f64>> {
        select_checked(&self.raster()?, indices)
    }
}

/// Destination for single-band products.
pub trait BandWriter {
    /// Write `band` to `path`, returning the path of the data file.
    fn write_band(
        &mut self,
        path: &Path,
        band: &Array2<f64>,
        georef: &GeoReference,
    ) -> SpectralResult<PathBuf>;
}

fn select_checked(raster: &Array3<f64>, indices: &[usize]) -> SpectralResult<Array3<f64>> {
    let bands = raster.len_of(Axis(2));
    if let Some(&bad) = indices.iter().find(|&&i| i >= bands) {
        return Err(SpectralError::shape_mismatch(format!(
            "band index {} out of range for {} bands",
            bad, bands
        )));
    }
    Ok(raster.select(Axis(2), indices))
}

/// Band wavelengths from ATCOR-style image metadata.
///
/// Keys look like `Band_<n>` (1-based) and values start with the centre
/// wavelength, e.g. `"443.2 (Band 3)"`. Every band must be described.
pub fn atcor_wavelengths(
    metadata: &HashMap<String, String>,
    band_count: usize,
) -> SpectralResult<Vec<f64>> {
    let mut wavelengths = vec![None; band_count];

    for (key, value) in metadata {
        let number = key
            .split('_')
            .nth(1)
            .and_then(|n| n.trim().parse::<f64>().ok())
            .ok_or_else(|| SpectralError::invalid_metadata(format!("bad band key '{}'", key)))?;

        let index = number as usize;
        if number.fract() != 0.0 || index == 0 || index > band_count {
            return Err(SpectralError::invalid_metadata(format!(
                "band key '{}' outside 1..={}",
                key, band_count
            )));
        }

        let wavelength = value
            .split(' ')
            .next()
            .and_then(|w| w.parse::<f64>().ok())
            .ok_or_else(|| {
                SpectralError::invalid_metadata(format!("bad wavelength '{}' for {}", value, key))
            })?;

        wavelengths[index - 1] = Some(wavelength);
    }

    wavelengths
        .into_iter()
        .enumerate()
        .map(|(i, w)| {
            w.ok_or_else(|| SpectralError::invalid_metadata(format!("no wavelength for Band_{}", i + 1)))
        })
        .collect()
}

/// An image held in memory.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    name: String,
    raster: Array3<f64>,
    wavelengths: Vec<f64>,
    georef: GeoReference,
}

impl MemoryImage {
    pub fn new(
        name: impl Into<String>,
        raster: Array3<f64>,
        wavelengths: Vec<f64>,
        georef: GeoReference,
    ) -> SpectralResult<Self> {
        if raster.len_of(Axis(2)) != wavelengths.len() {
            return Err(SpectralError::shape_mismatch(format!(
                "raster has {} bands but {} wavelengths were given",
                raster.len_of(Axis(2)),
                wavelengths.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            raster,
            wavelengths,
            georef,
        })
    }

    /// Build from a raster and its ATCOR metadata.
    pub fn from_atcor(
        name: impl Into<String>,
        raster: Array3<f64>,
        metadata: &HashMap<String, String>,
        georef: GeoReference,
    ) -> SpectralResult<Self> {
        let wavelengths = atcor_wavelengths(metadata, raster.len_of(Axis(2)))?;
        Self::new(name, raster, wavelengths, georef)
    }
}

impl SpectralImageReader for MemoryImage {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    fn raster(&self) -> SpectralResult<Array3<f64>> {
        Ok(self.raster.clone())
    }

    fn wavelengths(&self) -> SpectralResult<Vec<f64>> {
        Ok(self.wavelengths.clone())
    }

    fn georeference(&self) -> SpectralResult<GeoReference> {
        Ok(self.georef.clone())
    }

    fn read_bands(&self, indices: &[usize]) -> SpectralResult<Array3<f64>> {
        select_checked(&self.raster, indices)
    }
}

/// Writes ENVI single-band float32 images.
///
/// The data file holds little-endian `f32` samples, band sequential; the
/// header sits next to it with a `.hdr` extension.
#[derive(Debug, Clone, Default)]
pub struct EnviWriter {
    description: Option<String>,
}

impl EnviWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }

    /// Header path for a data file.
    ///
    /// The extension is replaced with `.hdr`, unless the data file already
    /// ends in `.hdr`, in which case `.hdr` is appended.
    pub fn header_path(path: &Path) -> PathBuf {
        let is_header = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("hdr"));
        if !is_header {
            return path.with_extension("hdr");
        }
        let mut name = path.as_os_str().to_os_string();
        name.push(".hdr");
        PathBuf::from(name)
    }

    /// ENVI header text for a `rows x cols` band.
    pub fn header(&self, rows: usize, cols: usize, georef: &GeoReference) -> String {
        let t = &georef.transform;
        let mut header = String::from("ENVI\n");
        if let Some(description) = &self.description {
            let _ = writeln!(header, "description = {{{}}}", description);
        }
        let _ = writeln!(header, "samples = {}", cols);
        let _ = writeln!(header, "lines = {}", rows);
        header.push_str("bands = 1\n");
        header.push_str("header offset = 0\n");
        header.push_str("file type = ENVI Standard\n");
        header.push_str("data type = 4\n");
        header.push_str("interleave = bsq\n");
        header.push_str("byte order = 0\n");
        let _ = writeln!(
            header,
            "map info = {{Arbitrary, 1, 1, {}, {}, {}, {}}}",
            t[0], t[3], t[1], -t[5]
        );
        if t[2] != 0.0 || t[4] != 0.0 {
            let _ = writeln!(
                header,
                "geo transform = {{{}, {}, {}, {}, {}, {}}}",
                t[0], t[1], t[2], t[3], t[4], t[5]
            );
        }
        if !georef.projection.is_empty() {
            let _ = writeln!(header, "coordinate system string = {{{}}}", georef.projection);
        }
        header
    }
}

impl BandWriter for EnviWriter {
    fn write_band(
        &mut self,
        path: &Path,
        band: &Array2<f64>,
        georef: &GeoReference,
    ) -> SpectralResult<PathBuf> {
        let (rows, cols) = band.dim();

        let mut buf = BytesMut::with_capacity(rows * cols * 4);
        for &value in band.iter() {
            buf.put_f32_le(value as f32);
        }
        fs::write(path, &buf)?;

        let header_path = Self::header_path(path);
        fs::write(&header_path, self.header(rows, cols, georef))?;

        info!(
            path = %path.display(),
            rows = rows,
            cols = cols,
            "Wrote ENVI band"
        );
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_atcor_wavelengths() {
        let meta = metadata(&[
            ("Band_2", "489.5 (Band 2)"),
            ("Band_1", "443.0 (Band 1)"),
            ("Band_3", "555 nm"),
        ]);
        assert_eq!(atcor_wavelengths(&meta, 3).unwrap(), vec![443.0, 489.5, 555.0]);
    }

    #[test]
    fn test_atcor_missing_band() {
        let meta = metadata(&[("Band_1", "443.0")]);
        assert!(matches!(
            atcor_wavelengths(&meta, 2),
            Err(SpectralError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_atcor_bad_entries() {
        for (key, value) in [("Band_9", "443.0"), ("Band", "443.0"), ("Band_1", "n/a")] {
            let meta = metadata(&[(key, value)]);
            assert!(atcor_wavelengths(&meta, 1).is_err(), "{}={} accepted", key, value);
        }
    }

    #[test]
    fn test_header_echoes_georeference() {
        let georef = GeoReference {
            transform: [500000.0, 2.0, 0.0, 4200000.0, 0.0, -2.0],
            projection: "UTM zone 30N".to_string(),
        };
        let header = EnviWriter::new().header(3, 4, &georef);
        assert!(header.starts_with("ENVI\n"));
        assert!(header.contains("samples = 4\n"));
        assert!(header.contains("lines = 3\n"));
        assert!(header.contains("data type = 4\n"));
        assert!(header.contains("map info = {Arbitrary, 1, 1, 500000, 4200000, 2, 2}"));
        assert!(header.contains("coordinate system string = {UTM zone 30N}"));
        assert!(!header.contains("geo transform"));
    }

    #[test]
    fn test_header_path() {
        assert_eq!(
            EnviWriter::header_path(Path::new("/out/chl_git_scene.bsq")),
            PathBuf::from("/out/chl_git_scene.hdr")
        );
        assert_eq!(
            EnviWriter::header_path(Path::new("/out/chl_git_scene.hdr")),
            PathBuf::from("/out/chl_git_scene.hdr.hdr")
        );
        assert_eq!(
            EnviWriter::header_path(Path::new("/out/scene.HDR")),
            PathBuf::from("/out/scene.HDR.hdr")
        );
    }

    #[test]
    fn test_memory_image_band_count_checked() {
        let raster = Array3::<f64>::zeros((1, 1, 2));
        assert!(MemoryImage::new("x", raster, vec![400.0], GeoReference::default()).is_err());
    }
}
