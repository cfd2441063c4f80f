//! Tests for loading toolbox configuration from disk.

use egads_common::{CommonError, ToolboxConfig};
use std::io::Write;

// ============================================================================
// from_yaml_file tests
// ============================================================================

#[test]
fn test_load_full_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "file_cache_limit: 16\n\
         missing_value: -999.0\n\
         interpolation_fill_value: -1.0\n\
         water_mask_wavelength: 772.0\n\
         water_mask_threshold: 0.08"
    )
    .unwrap();

    let config = ToolboxConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.file_cache_limit, 16);
    assert_eq!(config.missing_value, -999.0);
    assert_eq!(config.interpolation_fill_value, -1.0);
    assert_eq!(config.water_mask_wavelength, 772.0);
    assert!((config.water_mask_threshold - 0.08).abs() < 1e-12);
}

#[test]
fn test_empty_mapping_gives_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{}}").unwrap();

    let config = ToolboxConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, ToolboxConfig::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ToolboxConfig::from_yaml_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(CommonError::Io(_))));
}

#[test]
fn test_negative_wavelength_rejected() {
    let result = ToolboxConfig::from_yaml_str("water_mask_wavelength: -5.0");
    assert!(matches!(result, Err(CommonError::ConfigError(_))));
}
