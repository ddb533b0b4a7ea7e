//! Tests for config module

#[cfg(test)]
mod tests {
    use crate::config::*;
    use serial_test::serial;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    // ========================================================================
    // Defaults
    // ========================================================================

    #[test]
    fn test_config_default_values() {
        // Arrange & Act
        let config = RunConfig::default();

        // Assert
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.witnesses, WitnessMode::First);
        assert!(!config.strict_method);
        assert!(!config.parallel);
        assert_eq!(config.approximate.samples, 4096);
        assert_eq!(config.approximate.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_witness_mode_serialization() {
        let json = serde_json::to_string(&WitnessMode::All).expect("serialize");
        let back: WitnessMode = serde_json::from_str("\"first\"").expect("deserialize");

        assert_eq!(json, "\"all\"");
        assert_eq!(back, WitnessMode::First);
    }

    // ========================================================================
    // TOML
    // ========================================================================

    #[test]
    fn test_config_from_toml_partial() {
        // Arrange
        let toml_str = r#"
output_dir = "out"
witnesses = "all"

[approximate]
samples = 128
"#;

        // Act
        let config = RunConfig::from_toml(toml_str).expect("parse");

        // Assert
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.witnesses, WitnessMode::All);
        assert_eq!(config.approximate.samples, 128);
        assert_eq!(config.approximate.seed, 42);
        assert!(!config.parallel);
    }

    #[test]
    fn test_config_from_toml_rejects_zero_samples() {
        let err = RunConfig::from_toml("[approximate]\nsamples = 0\n").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "approximate.samples"));
    }

    #[test]
    fn test_config_from_toml_rejects_bad_type() {
        let err = RunConfig::from_toml("parallel = \"sometimes\"").unwrap_err();

        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    #[serial]
    fn test_config_load_from_path() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "strict_method = true\ndelimiter = \";\"").expect("write");

        let config = RunConfig::load_from_path(file.path()).expect("load");

        assert!(config.strict_method);
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_config_load_from_missing_path() {
        let err = RunConfig::load_from_path("/definitely/not/here/maxrank.toml").unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    // ========================================================================
    // Environment
    // ========================================================================

    #[test]
    #[serial]
    fn test_config_env_overrides() {
        std::env::set_var("MAXRANK_PARALLEL", "true");
        std::env::set_var("MAXRANK_APPROXIMATE__SEED", "7");

        let config = RunConfig::load();

        std::env::remove_var("MAXRANK_PARALLEL");
        std::env::remove_var("MAXRANK_APPROXIMATE__SEED");

        let config = config.expect("load");
        assert!(config.parallel);
        assert_eq!(config.approximate.seed, 7);
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_validate_tolerance() {
        let mut config = RunConfig::default();

        config.tolerance = 0.0;
        assert!(config.validate().is_err());

        config.tolerance = f64::NAN;
        assert!(config.validate().is_err());

        config.tolerance = 1e-6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_delimiter() {
        let config = RunConfig {
            delimiter: '¦',
            ..RunConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }
}
