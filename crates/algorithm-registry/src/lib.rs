//! Catalog of named processing algorithms.
//!
//! Builtin kernels are registered by [`AlgorithmRegistry::with_builtins`].
//! Further entries come from YAML descriptors that publish a builtin kernel
//! under another name and category, see [`loader`].

pub mod builtins;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use loader::{AlgorithmDescriptor, LoadReport};
pub use registry::{Algorithm, AlgorithmInfo, AlgorithmRegistry, ComputeFn};
