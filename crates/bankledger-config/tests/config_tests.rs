use std::path::PathBuf;

use bankledger_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_resolves_non_empty_paths() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(cfg.resolve_store_file().ends_with("bankledger/store.json"));
    assert!(cfg.resolve_export_dir().ends_with("bankledger"));
}

#[test]
fn explicit_paths_override_the_defaults() {
    let cfg = Config {
        store_file: Some(PathBuf::from("/tmp/custom/store.json")),
        export_dir: Some(PathBuf::from("/tmp/exports")),
        ..Config::default()
    };

    assert_eq!(cfg.resolve_store_file(), PathBuf::from("/tmp/custom/store.json"));
    assert_eq!(cfg.resolve_export_dir(), PathBuf::from("/tmp/exports"));
}

#[test]
fn load_on_a_missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = manager.load().expect("load config");
    assert_eq!(cfg.currency, Config::default_currency());
    assert!(cfg.store_file.is_none());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        currency: "USD".to_string(),
        store_file: Some(dir.path().join("store.json")),
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.store_file, Some(dir.path().join("store.json")));
}
