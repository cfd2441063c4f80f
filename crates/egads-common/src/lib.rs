//! Common types and utilities shared across the airborne data toolbox.
//!
//! - [`time`]: calendar-format templates and date-time helpers
//! - [`masked`]: numeric arrays with an explicit missing-value mask
//! - [`config`]: toolbox-wide settings loaded from YAML

pub mod config;
pub mod error;
pub mod masked;
pub mod time;

pub use config::ToolboxConfig;
pub use error::{CommonError, CommonResult};
pub use masked::MaskedArray;
pub use time::{
    datetime_components, parse_with_format, to_yyyymmddhh, translate_time_format,
    DateTimeComponents,
};
