//! Integration tests for [`ising_golden::config`].

use ising_golden::config::GoldenConfig;
use ising_golden::ConfigError;
use tempfile::tempdir;

#[test]
fn default_config_is_valid() {
    GoldenConfig::default()
        .validate()
        .expect("default GoldenConfig must be valid");
}

#[test]
fn default_values_match_reference_run() {
    let cfg = GoldenConfig::default();
    assert_eq!(cfg.vector_size, 256);
    assert_eq!(cfg.constant_coupling, 3);
    assert_eq!(cfg.seed, 42);
    assert!(cfg.columns_per_cycle <= cfg.vector_size);
}

#[test]
fn json_round_trip_preserves_every_field() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("golden.json");
    let cfg = GoldenConfig {
        vector_size: 64,
        constant_coupling: -2,
        random_max: 9,
        columns_per_cycle: 16,
        random_trials: 3,
        seed: 1234,
    };
    cfg.to_json(&path).expect("write config");
    let loaded = GoldenConfig::from_json(&path).expect("read config");
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_file_is_file_read_error() {
    let dir = tempdir().expect("tempdir");
    let err = GoldenConfig::from_json(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { .. }));
}

#[test]
fn malformed_json_is_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ vector_size: ").unwrap();
    let err = GoldenConfig::from_json(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("zero.json");
    std::fs::write(&path, r#"{ "vector_size": 0 }"#).unwrap();
    let err = GoldenConfig::from_json(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "vector_size", .. }));
}

#[test]
fn overflowing_coupling_is_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("huge.json");
    std::fs::write(&path, r#"{ "constant_coupling": 1000000000000000000 }"#).unwrap();
    let err = GoldenConfig::from_json(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "constant_coupling", .. }));
}
