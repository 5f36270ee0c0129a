// Test that SourceConfig fields fall back to defaults when missing or zero
use std::fs::File;
use std::io::Write;
use tamarin::config::load_source_config;
use tempfile::tempdir;

#[test]
fn test_source_config_full() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("source.yaml");
    let mut file = File::create(&config_path).unwrap();
    writeln!(file, "prefix: 'myapp'").unwrap();
    writeln!(file, "interval_secs: 5").unwrap();
    writeln!(file, "labels:").unwrap();
    writeln!(file, "  app: 'myapp'").unwrap();
    writeln!(file, "  env: 'prod'").unwrap();
    drop(file);

    let config = load_source_config(&config_path).unwrap();
    assert_eq!(config.prefix, "myapp");
    assert_eq!(config.interval_secs, 5);
    assert_eq!(config.labels.get("app").map(String::as_str), Some("myapp"));
    assert_eq!(config.labels.get("env").map(String::as_str), Some("prod"));
}

#[test]
fn test_source_config_defaults_from_empty_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("empty.yaml");
    File::create(&config_path).unwrap();

    let config = load_source_config(&config_path).unwrap();
    assert_eq!(config.prefix, "host_process");
    assert_eq!(config.interval_secs, 15);
    assert!(config.labels.is_empty());
}

#[test]
fn test_source_config_defaults_enforced_on_zero_values() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("zeroed.yaml");
    let mut file = File::create(&config_path).unwrap();
    // Intentionally set fields to zero/empty
    writeln!(file, "prefix: ''").unwrap();
    writeln!(file, "interval_secs: 0").unwrap();
    drop(file);

    let config = load_source_config(&config_path).unwrap();
    assert_eq!(config.prefix, "host_process");
    assert_eq!(config.interval_secs, 15);
}

#[test]
fn test_source_config_default_is_already_normalized() {
    // The default value must be usable as-is: a zero interval would not be a
    // valid sampling interval.
    let config = tamarin::config::SourceConfig::default();
    assert_eq!(config.prefix, "host_process");
    assert_eq!(config.interval_secs, 15);
    assert!(config.labels.is_empty());
}

#[test]
fn test_source_config_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("does_not_exist.yaml");

    let config = load_source_config(&config_path).unwrap();
    assert_eq!(config.prefix, "host_process");
    assert_eq!(config.interval_secs, 15);
}
