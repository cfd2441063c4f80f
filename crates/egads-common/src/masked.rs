//! Masked numeric arrays.
//!
//! A [`MaskedArray`] pairs dense `f64` data with a boolean mask of the same
//! shape. An element is missing iff its mask cell is `true`; the data value
//! underneath a masked cell is meaningless and never exposed by
//! [`MaskedArray::filled`].

use ndarray::{ArrayD, IxDyn, Zip};

use crate::error::{CommonError, CommonResult};

/// Dense numeric array with a missing-value mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray {
    data: ArrayD<f64>,
    mask: ArrayD<bool>,
    missing_value: f64,
}

impl MaskedArray {
    /// Create a masked array from data and an explicit mask.
    pub fn new(data: ArrayD<f64>, mask: ArrayD<bool>, missing_value: f64) -> CommonResult<Self> {
        if data.shape() != mask.shape() {
            return Err(CommonError::shape_mismatch(data.shape(), mask.shape()));
        }
        Ok(Self {
            data,
            mask,
            missing_value,
        })
    }

    /// Wrap data with nothing masked.
    pub fn from_data(data: ArrayD<f64>, missing_value: f64) -> Self {
        let mask = ArrayD::from_elem(data.raw_dim(), false);
        Self {
            data,
            mask,
            missing_value,
        }
    }

    /// Wrap data, masking every element equal to the sentinel.
    pub fn with_missing_values(data: ArrayD<f64>, missing_value: f64) -> Self {
        let mask = data.mapv(|v| is_sentinel(v, missing_value));
        Self {
            data,
            mask,
            missing_value,
        }
    }

    /// Build from a shape and row-major values, nothing masked.
    pub fn from_shape_vec(
        shape: &[usize],
        values: Vec<f64>,
        missing_value: f64,
    ) -> CommonResult<Self> {
        let data = ArrayD::from_shape_vec(IxDyn(shape), values)?;
        Ok(Self::from_data(data, missing_value))
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// The sentinel reported for missing cells. Fixed at construction.
    pub fn missing_value(&self) -> f64 {
        self.missing_value
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the element at `index` is missing, `None` if out of range.
    pub fn is_missing(&self, index: &[usize]) -> Option<bool> {
        self.mask.get(IxDyn(index)).copied()
    }

    pub fn count_missing(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Dense copy with the sentinel written into every missing cell.
    pub fn filled(&self) -> ArrayD<f64> {
        let missing = self.missing_value;
        Zip::from(&self.data)
            .and(&self.mask)
            .map_collect(|&v, &m| if m { missing } else { v })
    }

    /// Flattened, row-major dense values (sentinel at missing cells).
    pub fn to_vec(&self) -> Vec<f64> {
        self.filled().iter().copied().collect()
    }

    /// Apply `f` to every valid element, leaving masked cells untouched.
    pub fn map_valid<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let data = Zip::from(&self.data)
            .and(&self.mask)
            .map_collect(|&v, &m| if m { v } else { f(v) });
        Self {
            data,
            mask: self.mask.clone(),
            missing_value: self.missing_value,
        }
    }

    /// Rewrite every cell from its `(value, missing)` pair.
    ///
    /// Shape and sentinel carry over; only values and mask change.
    pub fn map_cells<F>(&self, f: F) -> Self
    where
        F: Fn(f64, bool) -> (f64, bool),
    {
        let cells = Zip::from(&self.data)
            .and(&self.mask)
            .map_collect(|&v, &m| f(v, m));
        Self {
            data: cells.mapv(|(v, _)| v),
            mask: cells.mapv(|(_, m)| m),
            missing_value: self.missing_value,
        }
    }

    pub fn into_parts(self) -> (ArrayD<f64>, ArrayD<bool>, f64) {
        (self.data, self.mask, self.missing_value)
    }
}

fn is_sentinel(value: f64, missing_value: f64) -> bool {
    value == missing_value || (missing_value.is_nan() && value.is_nan())
}
