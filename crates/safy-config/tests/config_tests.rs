use safy_config::{Config, ConfigManager};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_no_file_exists() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let config = manager.load().expect("load defaults");
    assert_eq!(config.default_goal, 6000.0);
    assert_eq!(config.default_monthly_target, 3000.0);
    assert_eq!(config.currency, "ZAR");
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut config = Config::default();
    config.currency = "USD".into();
    config.default_goal = 12000.0;
    config.data_dir = Some(dir.path().join("data"));
    manager.save(&config).expect("save config");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.default_goal, 12000.0);
    assert_eq!(loaded.data_dir, Some(dir.path().join("data")));
    assert!(manager.config_path().exists());
}

#[test]
fn partial_config_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), r#"{ "currency": "EUR" }"#).expect("write partial file");

    let loaded = manager.load().expect("load partial");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.default_goal, 6000.0);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    manager.save(&Config::default()).expect("save config");

    let config_dir = manager.config_path().parent().expect("parent");
    for entry in fs::read_dir(config_dir).expect("read dir") {
        let path = entry.expect("entry").path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }
}
