//! Bounded-value transforms over masked arrays.
//!
//! Values below a lower bound or above an upper bound are either masked out
//! or clamped onto the bound. Values equal to a bound are in range. Every
//! function returns a new array; inputs are never modified.

use std::fmt;
use std::str::FromStr;

use egads_common::MaskedArray;

use crate::error::GridError;

/// What to do with an out-of-bounds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetAs {
    /// Mark the element as missing.
    #[default]
    Missing,
    /// Replace the element by the bound it crossed.
    Bound,
}

impl FromStr for SetAs {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing" => Ok(Self::Missing),
            "bound" => Ok(Self::Bound),
            other => Err(GridError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for SetAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Bound => write!(f, "bound"),
        }
    }
}

/// Restrict `var` to `[lower, upper]`. A `None` bound disables that side.
pub fn restrict(
    var: &MaskedArray,
    lower: Option<f64>,
    upper: Option<f64>,
    set_as: SetAs,
) -> MaskedArray {
    match set_as {
        SetAs::Missing => mask_out_of_bounds(var, lower, upper),
        SetAs::Bound => bring_within_bounds(var, lower, upper),
    }
}

/// Mask every element below `lower` or above `upper`.
///
/// Elements that were already missing stay missing.
pub fn mask_out_of_bounds(var: &MaskedArray, lower: Option<f64>, upper: Option<f64>) -> MaskedArray {
    var.map_cells(|value, missing| {
        let outside = lower.is_some_and(|lo| value < lo) || upper.is_some_and(|hi| value > hi);
        (value, missing || outside)
    })
}

/// Clamp every valid element onto `[lower, upper]`.
///
/// The lower bound is applied before the upper one, so with `lower > upper`
/// everything ends up at `upper`. The mask is left as it was.
pub fn bring_within_bounds(var: &MaskedArray, lower: Option<f64>, upper: Option<f64>) -> MaskedArray {
    var.map_cells(|value, missing| {
        if missing {
            return (value, true);
        }
        let value = match lower {
            Some(lo) if value < lo => lo,
            _ => value,
        };
        let value = match upper {
            Some(hi) if value > hi => hi,
            _ => value,
        };
        (value, false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, ArrayD};

    fn zero_centred() -> MaskedArray {
        MaskedArray::from_data(arr1(&[-2.0, -1.0, 0.0, 1.0, 2.0]).into_dyn(), 1.0e20)
    }

    #[test]
    fn test_set_as_from_str() {
        assert_eq!("missing".parse::<SetAs>().unwrap(), SetAs::Missing);
        assert_eq!("bound".parse::<SetAs>().unwrap(), SetAs::Bound);
        assert_eq!(
            "clip".parse::<SetAs>(),
            Err(GridError::InvalidMode("clip".to_string()))
        );
        assert_eq!(SetAs::Bound.to_string(), "bound");
    }

    #[test]
    fn test_zero_lower_bound_is_honoured() {
        let clamped = bring_within_bounds(&zero_centred(), Some(0.0), None);
        assert_eq!(clamped.to_vec(), vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_zero_upper_bound_is_honoured() {
        let clamped = bring_within_bounds(&zero_centred(), None, Some(0.0));
        assert_eq!(clamped.to_vec(), vec![-2.0, -1.0, 0.0, 0.0, 0.0]);

        let masked = mask_out_of_bounds(&zero_centred(), None, Some(0.0));
        assert_eq!(masked.count_missing(), 2);
    }

    #[test]
    fn test_no_bounds_is_identity() {
        let var = zero_centred();
        assert_eq!(restrict(&var, None, None, SetAs::Missing), var);
        assert_eq!(restrict(&var, None, None, SetAs::Bound), var);
    }

    #[test]
    fn test_clamp_keeps_existing_mask() {
        let data = arr1(&[0.0, 1.0, 2.0, 3.0, 4.0, 999.0]).into_dyn();
        let var = MaskedArray::with_missing_values(data, 999.0);
        let clamped = bring_within_bounds(&var, Some(1.0), Some(3.0));
        assert_eq!(clamped.to_vec(), vec![1.0, 1.0, 2.0, 3.0, 3.0, 999.0]);
        assert_eq!(clamped.is_missing(&[5]), Some(true));
    }

    #[test]
    fn test_input_is_not_modified() {
        let var = zero_centred();
        let before: ArrayD<f64> = var.data().clone();
        let _ = restrict(&var, Some(-1.0), Some(1.0), SetAs::Bound);
        let _ = restrict(&var, Some(-1.0), Some(1.0), SetAs::Missing);
        assert_eq!(var.data(), &before);
        assert_eq!(var.count_missing(), 0);
    }
}
