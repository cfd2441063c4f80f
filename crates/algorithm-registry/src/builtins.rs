//! Kernels shipped with the registry.

use ndarray::ArrayD;

use egads_common::MaskedArray;

use crate::error::{RegistryError, RegistryResult};
use crate::registry::{Algorithm, AlgorithmInfo, ComputeFn};

pub const MATHEMATICS: &str = "mathematics";

/// Every builtin algorithm.
pub fn all() -> Vec<Algorithm> {
    vec![
        Algorithm::new(
            AlgorithmInfo::new(
                "limit_angle_range",
                MATHEMATICS,
                "Wrap angles in degrees into the 0 to 360 range",
                &["angle"],
                &["angle_limited"],
            ),
            limit_angle_range,
        ),
        Algorithm::new(
            AlgorithmInfo::new(
                "derivative_wrt_time",
                MATHEMATICS,
                "Time derivative of a series by centred differences",
                &["x", "t"],
                &["dxdt"],
            ),
            derivative_wrt_time,
        ),
    ]
}

/// Builtin kernel bound to `name`, if any.
pub fn kernel(name: &str) -> Option<Algorithm> {
    all().into_iter().find(|a| a.info.name == name)
}

/// Compute function of the builtin `name`.
pub fn compute_fn(name: &str) -> Option<ComputeFn> {
    kernel(name).map(|a| a.compute)
}

/// Wrap every valid angle into the 0 to 360 degree range.
///
/// Non-negative angles land in `[0, 360)` and negative angles in `(0, 360]`,
/// so `-360` maps to `360` while `360` maps to `0`.
pub fn limit_angle_range(inputs: &[MaskedArray]) -> RegistryResult<Vec<MaskedArray>> {
    let angle = single(inputs)?;
    Ok(vec![angle.map_valid(wrap_degrees)])
}

fn wrap_degrees(value: f64) -> f64 {
    let remainder = (value % 360.0).abs();
    if value >= 0.0 {
        remainder
    } else {
        360.0 - remainder
    }
}

/// dx/dt along a series.
///
/// Interior points use `(x[i+1] - x[i-1]) / (t[i+1] - t[i-1])`; the first
/// and last points use the adjacent one-sided difference. A result is
/// missing when any value it depends on is missing or the time step is zero.
pub fn derivative_wrt_time(inputs: &[MaskedArray]) -> RegistryResult<Vec<MaskedArray>> {
    let (x, t) = match inputs {
        [x, t] => (x, t),
        _ => {
            return Err(RegistryError::invalid_input(format!(
                "expected x and t, got {} inputs",
                inputs.len()
            )))
        }
    };

    let n = x.len();
    if t.len() != n {
        return Err(RegistryError::invalid_input(format!(
            "x has {} values but t has {}",
            n,
            t.len()
        )));
    }
    if n < 2 {
        return Err(RegistryError::invalid_input(
            "at least two samples are needed for a derivative",
        ));
    }

    let xv: Vec<f64> = x.data().iter().copied().collect();
    let xm: Vec<bool> = x.mask().iter().copied().collect();
    let tv: Vec<f64> = t.data().iter().copied().collect();
    let tm: Vec<bool> = t.mask().iter().copied().collect();

    let mut values = Vec::with_capacity(n);
    let mut missing = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(n - 1);
        let dt = tv[hi] - tv[lo];
        if xm[lo] || xm[hi] || tm[lo] || tm[hi] || dt == 0.0 {
            values.push(x.missing_value());
            missing.push(true);
        } else {
            values.push((xv[hi] - xv[lo]) / dt);
            missing.push(false);
        }
    }

    let shape = x.data().raw_dim();
    let data = ArrayD::from_shape_vec(shape.clone(), values)
        .map_err(|e| RegistryError::invalid_input(e.to_string()))?;
    let mask = ArrayD::from_shape_vec(shape, missing)
        .map_err(|e| RegistryError::invalid_input(e.to_string()))?;
    Ok(vec![MaskedArray::new(data, mask, x.missing_value())?])
}

fn single(inputs: &[MaskedArray]) -> RegistryResult<&MaskedArray> {
    match inputs {
        [only] => Ok(only),
        _ => Err(RegistryError::invalid_input(format!(
            "expected one input, got {}",
            inputs.len()
        ))),
    }
}
