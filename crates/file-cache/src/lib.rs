//! Pool of open dataset handles.
//!
//! Long analysis scripts touch many files; opening a scientific dataset is
//! slow and descriptors are limited. [`FileHandleCache`] keeps up to `limit`
//! handles open and closes the oldest one when a new file would exceed it.
//!
//! # Architecture
//!
//! ```text
//! cache.open(opener, path)
//!      │
//!      ├─► normalise path into a key
//!      │
//!      ├─► key cached: return the same handle (insertion order unchanged)
//!      │
//!      └─► key not cached
//!               │
//!               ├─► at limit: close + drop oldest handle
//!               │
//!               └─► opener(path, mode) → insert → return handle
//! ```
//!
//! # Example
//!
//! ```ignore
//! use file_cache::{FileHandleCache, OpenMode};
//!
//! let mut cache = FileHandleCache::new();
//! let file = cache.open(file_cache::open_netcdf, "flight_042.nc")?;
//! // ...
//! cache.close_all()?;
//! ```

pub mod cache;
pub mod error;
pub mod handle;
#[cfg(feature = "netcdf")]
pub mod netcdf_handle;
pub mod stats;

pub use cache::{FileHandleCache, DEFAULT_FILE_LIMIT};
pub use error::{CacheError, CacheResult, CloseFailure};
pub use handle::{normalize_path, DatasetHandle, HandleError, OpenMode};
#[cfg(feature = "netcdf")]
pub use netcdf_handle::{open_netcdf, NetCdfHandle};
pub use stats::CacheStats;
