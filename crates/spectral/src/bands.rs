//! Selection of the bands that bracket a set of target wavelengths.

use std::collections::BTreeSet;

/// Bands chosen from a spectral grid, as parallel index/wavelength lists.
///
/// Both lists are sorted by ascending wavelength and contain no duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandSelection {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl BandSelection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Pick the grid bands that bracket every target wavelength.
///
/// For each target the first interval `[grid[i], grid[i + 1]]` containing it
/// contributes both endpoints. The union is returned in grid order. If any
/// target lies outside the grid the selection is empty, which callers treat
/// as failure.
///
/// `grid` must be sorted in ascending order.
///
/// ```
/// use spectral::select_bands;
///
/// let grid = [400.0, 450.0, 500.0, 550.0, 600.0];
/// let selection = select_bands(&grid, &[443.0, 510.0]);
/// assert_eq!(selection.indices, vec![0, 1, 2, 3]);
/// ```
pub fn select_bands(grid: &[f64], targets: &[f64]) -> BandSelection {
    let mut indices = BTreeSet::new();

    for &target in targets {
        match bracket(grid, target) {
            Some(i) => {
                indices.insert(i);
                indices.insert(i + 1);
            }
            None => return BandSelection::default(),
        }
    }

    let indices: Vec<usize> = indices.into_iter().collect();
    let values = indices.iter().map(|&i| grid[i]).collect();
    BandSelection { indices, values }
}

/// Index `i` of the first interval `[grid[i], grid[i + 1]]` holding `target`.
pub(crate) fn bracket(grid: &[f64], target: f64) -> Option<usize> {
    grid.windows(2)
        .position(|pair| pair[0] <= target && target <= pair[1])
}
