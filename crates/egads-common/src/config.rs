//! Toolbox-wide configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CommonError, CommonResult};

/// Settings shared by the cache, the bounds transforms and the spectral
/// products. Every field has a default so a YAML file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolboxConfig {
    /// Maximum number of dataset handles kept open by the file cache.
    pub file_cache_limit: usize,

    /// Sentinel used for missing values in masked arrays.
    pub missing_value: f64,

    /// Value written where spectral interpolation falls outside the grid.
    pub interpolation_fill_value: f64,

    /// Wavelength (nm) of the band used for land/water detection.
    pub water_mask_wavelength: f64,

    /// Reflectance above which a pixel is treated as land.
    pub water_mask_threshold: f64,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            file_cache_limit: 1000,
            missing_value: 1.0e20,
            interpolation_fill_value: -9999.0,
            water_mask_wavelength: 875.0,
            water_mask_threshold: 800.0,
        }
    }
}

impl ToolboxConfig {
    /// Parse and validate configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> CommonResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded toolbox configuration");
        Self::from_yaml_str(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CommonResult<()> {
        if self.file_cache_limit == 0 {
            return Err(CommonError::config("file_cache_limit must be > 0"));
        }

        if !self.missing_value.is_finite() {
            return Err(CommonError::config("missing_value must be finite"));
        }

        if !self.interpolation_fill_value.is_finite() {
            return Err(CommonError::config(
                "interpolation_fill_value must be finite",
            ));
        }

        if !(self.water_mask_wavelength.is_finite() && self.water_mask_wavelength > 0.0) {
            return Err(CommonError::config("water_mask_wavelength must be > 0"));
        }

        if !self.water_mask_threshold.is_finite() {
            return Err(CommonError::config("water_mask_threshold must be finite"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ToolboxConfig::default();
        assert_eq!(config.file_cache_limit, 1000);
        assert_eq!(config.interpolation_fill_value, -9999.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ToolboxConfig::from_yaml_str("file_cache_limit: 4\n").unwrap();
        assert_eq!(config.file_cache_limit, 4);
        assert_eq!(config.missing_value, 1.0e20);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = ToolboxConfig::from_yaml_str("file_cache_limit: 0\n");
        assert!(matches!(result, Err(CommonError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let result = ToolboxConfig::from_yaml_str("file_cache_limit: [oops");
        assert!(matches!(result, Err(CommonError::ConfigError(_))));
    }
}
