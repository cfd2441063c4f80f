//! Common test fixtures for egads-rs tests.
//!
//! This module provides pre-defined inputs together with the outputs the
//! processing functions are expected to produce for them.

use egads_common::MaskedArray;
use ndarray::{arr2, Array2};

/// Default missing-value sentinel used across the fixtures.
pub const MISSING: f64 = 1.0e20;

/// Input used by the bounded-value transform tests.
pub const BOUNDS_CHECKER_INPUT: [[f64; 5]; 2] = [
    [1.2, 1.0, 8.3, 4.6, 0.3],
    [53.2, 1.2, 1.2, 4.5, 12.4],
];

/// [`BOUNDS_CHECKER_INPUT`] clamped onto `[1.0, 10.0]`.
pub const BOUNDS_CHECKER_CLAMPED_1_10: [[f64; 5]; 2] = [
    [1.2, 1.0, 8.3, 4.6, 1.0],
    [10.0, 1.2, 1.2, 4.5, 10.0],
];

/// Mask of [`BOUNDS_CHECKER_INPUT`] restricted to `[5.0, 12.0]`.
pub const BOUNDS_CHECKER_MASK_5_12: [[bool; 5]; 2] = [
    [true, true, false, true, true],
    [true, true, true, true, true],
];

/// The bounds-checker input as a masked array with nothing masked.
pub fn bounds_checker_array() -> MaskedArray {
    MaskedArray::from_data(arr2(&BOUNDS_CHECKER_INPUT).into_dyn(), MISSING)
}

/// Flatten a fixture table into row-major order.
pub fn flatten<T: Copy, const N: usize>(rows: &[[T; N]]) -> Vec<T> {
    rows.iter().flatten().copied().collect()
}

/// Common axis bounds for testing.
pub mod axes {
    /// Four 90° longitude quadrants covering the globe.
    pub const QUADRANTS: [[f64; 2]; 4] = [
        [-180.0, -90.0],
        [-90.0, 0.0],
        [0.0, 90.0],
        [90.0, 180.0],
    ];

    /// Quadrants listed east to west with every cell reversed.
    pub const QUADRANTS_DESCENDING: [[f64; 2]; 4] = [
        [180.0, 90.0],
        [90.0, 0.0],
        [0.0, -90.0],
        [-90.0, -180.0],
    ];

    /// Longitude cells straddling the dateline in 0..360 notation.
    pub const DATELINE: [[f64; 2]; 3] = [[170.0, 180.0], [180.0, 190.0], [190.0, 200.0]];

    /// Pressure levels in hPa, decreasing with altitude.
    pub const PRESSURE_LEVELS: [[f64; 2]; 4] = [
        [1000.0, 850.0],
        [850.0, 700.0],
        [700.0, 500.0],
        [500.0, 250.0],
    ];

    /// Second cell runs the other way.
    pub const MISORDERED: [[f64; 2]; 3] = [[0.0, 10.0], [20.0, 10.0], [20.0, 30.0]];

    /// Hole between 10 and 20.
    pub const GAPPED: [[f64; 2]; 2] = [[0.0, 10.0], [20.0, 30.0]];
}

/// Common spectral grids for testing.
pub mod spectra {
    /// Regular 50 nm grid covering the OC4 bands.
    pub const OC4_GRID: [f64; 7] = [400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0];

    /// OC4 target wavelengths.
    pub const OC4_TARGETS: [f64; 4] = [443.0, 489.0, 510.0, 555.0];

    /// Band indices of [`OC4_GRID`] bracketing [`OC4_TARGETS`].
    pub const OC4_SELECTION: [usize; 5] = [0, 1, 2, 3, 4];

    /// Irregular airborne-style grid from the visible into the near infrared.
    pub const VNIR_GRID: [f64; 10] = [
        401.5, 448.2, 497.9, 553.1, 602.4, 668.0, 690.7, 721.3, 752.9, 880.1,
    ];
}

/// A small `(rows, cols)` mask with the first row masked.
pub fn top_row_mask(rows: usize, cols: usize) -> Array2<bool> {
    Array2::from_shape_fn((rows, cols), |(r, _)| r == 0)
}
