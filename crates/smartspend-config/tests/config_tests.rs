use smartspend_config::{Config, ConfigError, ConfigManager};
use smartspend_domain::SpendCategory;
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.warning_ratio, 0.8);
    assert_eq!(cfg.classifier.limits.get(&SpendCategory::Shopping), Some(&300.0));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.warning_ratio = 0.9;
    cfg.classifier.endpoint = Some("http://localhost:8000/api/smartspend".into());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn partial_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale": "en-GB", "currency": "GBP"}"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.warning_ratio, 0.8);
    assert!(loaded.ui_color_enabled);
    assert_eq!(loaded.classifier.timeout_secs, 5);
}

#[test]
fn corrupt_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn set_validates_values() {
    let mut cfg = Config::default();
    cfg.set("warning_ratio", "0.75").expect("ratio");
    cfg.set("currency", "eur").expect("currency");
    cfg.set("ui_color_enabled", "off").expect("color");
    cfg.set("classifier.endpoint", "http://127.0.0.1:9/api").expect("endpoint");

    assert_eq!(cfg.warning_ratio, 0.75);
    assert_eq!(cfg.currency, "EUR");
    assert!(!cfg.ui_color_enabled);
    assert!(cfg.classifier.endpoint.is_some());

    assert!(matches!(
        cfg.set("warning_ratio", "1.5"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("theme", "dark"),
        Err(ConfigError::UnknownKey(_))
    ));
    cfg.set("classifier.endpoint", "none").expect("clear endpoint");
    assert!(cfg.classifier.endpoint.is_none());
}

#[test]
fn listed_keys_are_all_settable() {
    let mut cfg = Config::default();
    for key in Config::KEYS {
        assert!(
            !matches!(cfg.set(key, ""), Err(ConfigError::UnknownKey(_))),
            "{key} is listed but not handled"
        );
    }
}
