//! YAML descriptors that publish builtin kernels under further names.
//!
//! A descriptor file looks like:
//!
//! ```yaml
//! name: heading_limited
//! category: navigation
//! description: Aircraft heading wrapped to 0..360
//! kernel: limit_angle_range
//! ```
//!
//! Every `*.yaml` / `*.yml` file under the directory is loaded. A bad file
//! is logged and reported but never stops the remaining files from loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use walkdir::WalkDir;

use crate::builtins;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::{Algorithm, AlgorithmInfo, AlgorithmRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Name of the builtin kernel this entry runs.
    pub kernel: String,
}

impl AlgorithmDescriptor {
    pub fn from_yaml_str(content: &str, path: &Path) -> RegistryResult<Self> {
        serde_yaml::from_str(content).map_err(|source| RegistryError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> RegistryResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Bind to the named kernel, keeping its inputs and outputs.
    pub fn to_algorithm(&self, path: &Path) -> RegistryResult<Algorithm> {
        let kernel = builtins::kernel(&self.kernel).ok_or_else(|| RegistryError::UnknownKernel {
            path: path.to_path_buf(),
            kernel: self.kernel.clone(),
        })?;
        let info = AlgorithmInfo {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            inputs: kernel.info.inputs,
            outputs: kernel.info.outputs,
        };
        Ok(Algorithm::new(info, kernel.compute))
    }
}

/// Outcome of a descriptor directory load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names registered, in load order.
    pub loaded: Vec<String>,
    pub failures: Vec<(PathBuf, RegistryError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl AlgorithmRegistry {
    /// Register every descriptor found under `dir`, recursively.
    ///
    /// Files are visited in file-name order so duplicate resolution is
    /// deterministic: the first file claiming a name wins.
    pub fn load_descriptors(&mut self, dir: &Path) -> LoadReport {
        let mut report = LoadReport::default();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    let err = RegistryError::Io {
                        path: path.clone(),
                        source: e.into(),
                    };
                    error!(path = %path.display(), error = %err, "Failed to scan descriptor directory");
                    report.failures.push((path, err));
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_descriptor(path) {
                continue;
            }

            match self.load_descriptor(path) {
                Ok(name) => report.loaded.push(name),
                Err(err) => {
                    error!(path = %path.display(), error = %err, "Failed to load algorithm descriptor");
                    report.failures.push((path.to_path_buf(), err));
                }
            }
        }

        info!(
            dir = %dir.display(),
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Loaded algorithm descriptors"
        );
        report
    }

    fn load_descriptor(&mut self, path: &Path) -> RegistryResult<String> {
        let descriptor = AlgorithmDescriptor::from_file(path)?;
        let algorithm = descriptor.to_algorithm(path)?;
        self.register(algorithm)?;
        Ok(descriptor.name)
    }
}

fn is_descriptor(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let yaml = "name: heading\ncategory: navigation\nkernel: limit_angle_range\n";
        let descriptor = AlgorithmDescriptor::from_yaml_str(yaml, Path::new("h.yaml")).unwrap();
        assert_eq!(descriptor.name, "heading");
        assert_eq!(descriptor.description, "");

        let algorithm = descriptor.to_algorithm(Path::new("h.yaml")).unwrap();
        assert_eq!(algorithm.info.inputs, vec!["angle".to_string()]);
        assert_eq!(algorithm.info.category, "navigation");
    }

    #[test]
    fn test_unknown_kernel() {
        let yaml = "name: x\ncategory: y\nkernel: nope\n";
        let descriptor = AlgorithmDescriptor::from_yaml_str(yaml, Path::new("x.yaml")).unwrap();
        assert!(matches!(
            descriptor.to_algorithm(Path::new("x.yaml")),
            Err(RegistryError::UnknownKernel { kernel, .. }) if kernel == "nope"
        ));
    }

    #[test]
    fn test_missing_field() {
        let result = AlgorithmDescriptor::from_yaml_str("name: x\n", Path::new("x.yaml"));
        assert!(matches!(result, Err(RegistryError::Yaml { .. })));
    }

    #[test]
    fn test_is_descriptor() {
        assert!(is_descriptor(Path::new("a/b.yaml")));
        assert!(is_descriptor(Path::new("b.yml")));
        assert!(!is_descriptor(Path::new("b.txt")));
        assert!(!is_descriptor(Path::new("yaml")));
    }
}
