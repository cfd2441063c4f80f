//! Axis-bounds index resolution.
//!
//! An axis is described by a list of cells, each a `[lo, hi]` pair. The
//! resolver finds the cell containing a coordinate value, for axes that run
//! in either direction and for periodic axes such as longitude where the
//! coordinate wraps modulo 360.
//!
//! A linear scan is used rather than a binary search: bounds lists are short
//! and near the wrap point of a periodic axis the folded ordering is not
//! monotone.

use crate::error::{GridError, GridResult};

/// A single axis cell: `[lo, hi]`.
pub type Cell = [f64; 2];

/// Modulus for longitudes in degrees.
pub const LONGITUDE_MODULO: f64 = 360.0;

/// Ordering of an axis, within and between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    fn factor(self) -> f64 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }
}

/// Find the index of the cell whose bounds contain `value`.
///
/// `modulo` marks a periodic axis (e.g. `Some(360.0)` for longitude).
/// Cells are tested in order and the first match wins, so a value sitting
/// on an internal edge resolves to the earlier cell.
///
/// When no cell matches and `use_limits` is set, the first or last index is
/// returned instead; on a periodic axis whichever end is nearer wins.
pub fn find_index(
    value: f64,
    bounds: &[Cell],
    modulo: Option<f64>,
    use_limits: bool,
) -> GridResult<usize> {
    let modulo = checked_modulo(modulo)?;
    let first = bounds
        .first()
        .ok_or_else(|| GridError::structural("bounds list is empty"))?;
    let order = axis_order(bounds, modulo)
        .ok_or_else(|| GridError::structural("bounds ordered incorrectly"))?;

    if order_between(first[1], first[0], modulo) != Some(order) {
        return Err(GridError::structural("bounds ordered incorrectly"));
    }

    if value.is_nan() {
        return Err(GridError::OutOfRange { value });
    }

    if value.is_infinite() {
        if !use_limits {
            return Err(GridError::OutOfRange { value });
        }
        // infinities lie past whichever end they point towards
        return Ok(if value * order.factor() < 0.0 {
            0
        } else {
            bounds.len() - 1
        });
    }

    if let Some(index) = bounds
        .iter()
        .position(|cell| in_cell(value, cell, order, modulo))
    {
        return Ok(index);
    }

    if !use_limits {
        return Err(GridError::OutOfRange { value });
    }

    step_out(value, bounds, order, modulo)
}

/// Longitude wrapper around [`find_index`] with a modulus of 360.
pub fn find_index_longitude(value: f64, bounds: &[Cell], use_limits: bool) -> GridResult<usize> {
    find_index(value, bounds, Some(LONGITUDE_MODULO), use_limits)
}

/// A bounds list checked against the full orientation invariant.
///
/// [`find_index`] only inspects the first two cells; this type verifies
/// every cell up front so later lookups cannot hit a mis-ordered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    cells: Vec<Cell>,
    modulo: Option<f64>,
    direction: Direction,
}

impl AxisBounds {
    pub fn new(cells: Vec<Cell>, modulo: Option<f64>) -> GridResult<Self> {
        let modulo = checked_modulo(modulo)?;
        if cells.is_empty() {
            return Err(GridError::structural("bounds list is empty"));
        }
        let direction = axis_order(&cells, modulo)
            .ok_or_else(|| GridError::structural("bounds ordered incorrectly"))?;

        for (index, cell) in cells.iter().enumerate() {
            if order_between(cell[1], cell[0], modulo) != Some(direction) {
                return Err(GridError::structural(format!(
                    "cell {} [{}, {}] is oriented against the axis",
                    index, cell[0], cell[1]
                )));
            }
        }

        for (index, pair) in cells.windows(2).enumerate() {
            if order_between(pair[1][0], pair[0][0], modulo) != Some(direction) {
                return Err(GridError::structural(format!(
                    "cells {} and {} are out of order",
                    index,
                    index + 1
                )));
            }
        }

        Ok(Self {
            cells,
            modulo,
            direction,
        })
    }

    /// Longitude axis (modulo 360).
    pub fn longitude(cells: Vec<Cell>) -> GridResult<Self> {
        Self::new(cells, Some(LONGITUDE_MODULO))
    }

    pub fn find_index(&self, value: f64, use_limits: bool) -> GridResult<usize> {
        find_index(value, &self.cells, self.modulo, use_limits)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn modulo(&self) -> Option<f64> {
        self.modulo
    }

    pub fn is_periodic(&self) -> bool {
        self.modulo.is_some()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Build cell bounds from axis centre values.
///
/// Internal edges sit halfway between neighbouring centres; the outer edges
/// are extrapolated by half the adjacent spacing.
pub fn bounds_from_centres(centres: &[f64]) -> GridResult<Vec<Cell>> {
    if centres.len() < 2 {
        return Err(GridError::structural(
            "at least two centres are needed to infer cell bounds",
        ));
    }

    let n = centres.len();
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
    edges.extend(centres.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0));
    edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);

    Ok(edges.windows(2).map(|pair| [pair[0], pair[1]]).collect())
}

/// Normalise a longitude into `[0, 360)`.
pub fn wrap_longitude_0_360(lon: f64) -> f64 {
    lon.rem_euclid(LONGITUDE_MODULO)
}

/// Normalise a longitude into `[-180, 180)`.
pub fn wrap_longitude_180(lon: f64) -> f64 {
    (lon + LONGITUDE_MODULO / 2.0).rem_euclid(LONGITUDE_MODULO) - LONGITUDE_MODULO / 2.0
}

fn checked_modulo(modulo: Option<f64>) -> GridResult<Option<f64>> {
    match modulo {
        Some(m) if !(m.is_finite() && m > 0.0) => Err(GridError::InvalidModulo(m)),
        other => Ok(other),
    }
}

/// Axis ordering from the first two cells. A lone cell has no neighbour,
/// so its own orientation stands in.
fn axis_order(bounds: &[Cell], modulo: Option<f64>) -> Option<Direction> {
    match bounds {
        [first, second, ..] => order_between(second[0], first[0], modulo),
        [only] => order_between(only[1], only[0], modulo),
        [] => None,
    }
}

/// Difference `a - b`, folded into `[-M/2, M/2)` on a periodic axis.
fn folded_diff(a: f64, b: f64, modulo: Option<f64>) -> f64 {
    let diff = a - b;
    match modulo {
        Some(m) => (diff + m / 2.0).rem_euclid(m) - m / 2.0,
        None => diff,
    }
}

/// Ordering of `a` relative to `b`; `None` when they coincide.
fn order_between(a: f64, b: f64, modulo: Option<f64>) -> Option<Direction> {
    let diff = folded_diff(a, b, modulo);
    if diff > 0.0 {
        Some(Direction::Increasing)
    } else if diff < 0.0 {
        Some(Direction::Decreasing)
    } else {
        None
    }
}

/// Distance from `b` to `a` along the axis direction; `[0, M)` when periodic.
fn offset(a: f64, b: f64, order: Direction, modulo: Option<f64>) -> f64 {
    let diff = (a - b) * order.factor();
    match modulo {
        Some(m) => diff.rem_euclid(m),
        None => diff,
    }
}

fn in_cell(value: f64, cell: &Cell, order: Direction, modulo: Option<f64>) -> bool {
    let distance = offset(value, cell[0], order, modulo);
    let width = offset(cell[1], cell[0], order, modulo);
    (0.0..=width).contains(&distance)
}

fn step_out(value: f64, bounds: &[Cell], order: Direction, modulo: Option<f64>) -> GridResult<usize> {
    let last = bounds.len() - 1;
    let before_first = offset(bounds[0][0], value, order, modulo);
    let after_last = offset(value, bounds[last][1], order, modulo);

    match modulo {
        Some(m) => {
            if before_first + after_last > m {
                return Err(GridError::structural("gap in bounds array"));
            }
            Ok(if before_first < after_last { 0 } else { last })
        }
        None => {
            if before_first > 0.0 {
                Ok(0)
            } else if after_last > 0.0 {
                Ok(last)
            } else {
                Err(GridError::structural("gap in bounds array"))
            }
        }
    }
}
