//! In-memory algorithm catalog.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use egads_common::MaskedArray;

use crate::builtins;
use crate::error::{RegistryError, RegistryResult};

/// Signature shared by every algorithm kernel.
pub type ComputeFn = fn(&[MaskedArray]) -> RegistryResult<Vec<MaskedArray>>;

/// Descriptive metadata for a registered algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Input names, in the order `compute` expects them.
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl AlgorithmInfo {
    pub fn new(name: &str, category: &str, description: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A named, pure compute function.
#[derive(Clone)]
pub struct Algorithm {
    pub info: AlgorithmInfo,
    pub compute: ComputeFn,
}

impl Algorithm {
    pub fn new(info: AlgorithmInfo, compute: ComputeFn) -> Self {
        Self { info, compute }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Run the kernel after checking the input count.
    pub fn run(&self, inputs: &[MaskedArray]) -> RegistryResult<Vec<MaskedArray>> {
        if inputs.len() != self.info.inputs.len() {
            return Err(RegistryError::Arity {
                name: self.info.name.clone(),
                expected: self.info.inputs.len(),
                actual: inputs.len(),
            });
        }
        (self.compute)(inputs)
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm").field("info", &self.info).finish_non_exhaustive()
    }
}

/// Algorithms keyed by name.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<String, Algorithm>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin kernel.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let mut per_category: BTreeMap<String, usize> = BTreeMap::new();

        for algorithm in builtins::all() {
            *per_category.entry(algorithm.info.category.clone()).or_default() += 1;
            registry
                .algorithms
                .insert(algorithm.info.name.clone(), algorithm);
        }

        for (category, count) in &per_category {
            info!(category = %category, count = count, "Loaded builtin algorithms");
        }
        registry
    }

    /// Add an algorithm. Names are unique.
    pub fn register(&mut self, algorithm: Algorithm) -> RegistryResult<()> {
        let name = algorithm.info.name.clone();
        if self.algorithms.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        debug!(name = %name, category = %algorithm.info.category, "Registered algorithm");
        self.algorithms.insert(name, algorithm);
        Ok(())
    }

    pub fn get(&self, name: &str) -> RegistryResult<&Algorithm> {
        self.algorithms
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAlgorithm(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.algorithms.keys().map(String::as_str).collect()
    }

    /// Algorithms in `category`, sorted by name.
    pub fn by_category(&self, category: &str) -> Vec<&Algorithm> {
        self.algorithms
            .values()
            .filter(|a| a.info.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Look up `name` and run it on `inputs`.
    pub fn run(&self, name: &str, inputs: &[MaskedArray]) -> RegistryResult<Vec<MaskedArray>> {
        self.get(name)?.run(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn identity(inputs: &[MaskedArray]) -> RegistryResult<Vec<MaskedArray>> {
        Ok(inputs.to_vec())
    }

    fn identity_algorithm(name: &str, category: &str) -> Algorithm {
        Algorithm::new(AlgorithmInfo::new(name, category, "", &["x"], &["x"]), identity)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = AlgorithmRegistry::new();
        assert!(registry.is_empty());
        registry.register(identity_algorithm("copy", "misc")).unwrap();
        assert_eq!(registry.get("copy").unwrap().name(), "copy");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(identity_algorithm("copy", "misc")).unwrap();
        match registry.register(identity_algorithm("copy", "other")) {
            Err(RegistryError::Duplicate(name)) => assert_eq!(name, "copy"),
            other => panic!("expected Duplicate, got {:?}", other),
        }
        assert_eq!(registry.get("copy").unwrap().info.category, "misc");
    }

    #[test]
    fn test_unknown_name() {
        let registry = AlgorithmRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(RegistryError::UnknownAlgorithm(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_run_checks_arity() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(identity_algorithm("copy", "misc")).unwrap();
        let x = MaskedArray::from_data(arr1(&[1.0]).into_dyn(), -1.0);

        let err = registry.run("copy", &[x.clone(), x.clone()]).unwrap_err();
        assert!(matches!(err, RegistryError::Arity { expected: 1, actual: 2, .. }));
        assert_eq!(registry.run("copy", &[x.clone()]).unwrap(), vec![x]);
    }

    #[test]
    fn test_names_sorted_and_categories() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(identity_algorithm("b", "one")).unwrap();
        registry.register(identity_algorithm("a", "two")).unwrap();
        registry.register(identity_algorithm("c", "one")).unwrap();

        assert_eq!(registry.names(), vec!["a", "b", "c"]);
        let one: Vec<&str> = registry.by_category("one").iter().map(|a| a.name()).collect();
        assert_eq!(one, vec!["b", "c"]);
        assert!(registry.by_category("none").is_empty());
    }
}
