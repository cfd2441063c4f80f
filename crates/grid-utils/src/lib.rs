//! Utilities for working with gridded measurement variables.
//!
//! - [`bounds`]: map coordinate values (longitudes, latitudes, times) to the
//!   axis cell containing them, including periodic axes
//! - [`restrict`]: mask or clamp values that fall outside a valid range
//!
//! # Example
//!
//! ```
//! use grid_utils::find_index_longitude;
//!
//! let bounds = [[-180.0, -90.0], [-90.0, 0.0], [0.0, 90.0], [90.0, 180.0]];
//! assert_eq!(find_index_longitude(45.0, &bounds, false).unwrap(), 2);
//! ```

pub mod bounds;
pub mod error;
pub mod restrict;

pub use bounds::{
    bounds_from_centres, find_index, find_index_longitude, wrap_longitude_0_360,
    wrap_longitude_180, AxisBounds, Cell, Direction, LONGITUDE_MODULO,
};
pub use error::{GridError, GridResult};
pub use restrict::{bring_within_bounds, mask_out_of_bounds, restrict, SetAs};
