//! Spectral resampling and water-quality products for airborne imaging
//! spectrometers.
//!
//! Instrument bands rarely sit on the wavelengths a published algorithm
//! expects. This crate picks the bands bracketing each target, linearly
//! interpolates on that narrow set, evaluates the algorithm per pixel and
//! blanks out land with a near-infrared water mask.
//!
//! # Pipeline
//!
//! ```text
//! reader.wavelengths() ─► select_bands ─► reader.read_bands ─► interpolate_bands
//!                                                                   │
//!                                    WaterMask ─► apply_mask ◄─ algorithm.evaluate
//!                                                     │
//!                                               writer.write_band
//! ```

pub mod bands;
pub mod error;
pub mod io;
pub mod mask;
pub mod pipeline;
pub mod products;
pub mod resample;

pub use bands::{select_bands, BandSelection};
pub use error::{SpectralError, SpectralResult};
pub use io::{atcor_wavelengths, BandWriter, EnviWriter, GeoReference, MemoryImage, SpectralImageReader};
pub use mask::{apply_mask, WaterMask};
pub use pipeline::{
    chlorophyll_product, compute_masked_product, compute_product, run_product, tsm_product,
    ProductOptions,
};
pub use products::{
    gitelson, nechad_tsm, oc4v6, ChlorophyllAlgorithm, TsmAlgorithm, WaterQualityAlgorithm,
    GITELSON_BANDS, NECHAD_BANDS, OC4_BANDS,
};
pub use resample::{interpolate_bands, interpolate_bands_with_fill, resample, FILL_VALUE};
