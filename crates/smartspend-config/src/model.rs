use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use smartspend_domain::SpendCategory;

use crate::ConfigError;

/// Environment variable that relocates every SmartSpend file.
pub const HOME_ENV: &str = "SMARTSPEND_HOME";

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Share of a budget limit above which spends raise a warning.
    #[serde(default = "Config::default_warning_ratio")]
    pub warning_ratio: f64,
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the profile store. Defaults to the SmartSpend home.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            warning_ratio: Self::default_warning_ratio(),
            classifier: ClassifierConfig::default(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 8] = [
        "locale",
        "currency",
        "ui_color_enabled",
        "warning_ratio",
        "data_dir",
        "classifier.endpoint",
        "classifier.timeout_secs",
        "classifier.default_limit",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_warning_ratio() -> f64 {
        0.8
    }

    /// SmartSpend home: `$SMARTSPEND_HOME`, else the platform data dir, else `./.smartspend`.
    pub fn home_dir() -> PathBuf {
        if let Some(path) = std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .map(|base| base.join("smartspend"))
            .unwrap_or_else(|| PathBuf::from(".smartspend"))
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        Self::home_dir().join("data")
    }

    /// Updates one setting from its textual form, as typed in the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "warning_ratio" => {
                let ratio = parse_number(key, value)?;
                if ratio <= 0.0 || ratio > 1.0 {
                    return Err(invalid(key, "expected a ratio in (0, 1]"));
                }
                self.warning_ratio = ratio;
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "classifier.endpoint" => {
                self.classifier.endpoint = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "classifier.timeout_secs" => {
                self.classifier.timeout_secs = value
                    .parse()
                    .map_err(|_| invalid(key, "expected whole seconds"))?
            }
            "classifier.default_limit" => {
                let limit = parse_number(key, value)?;
                if limit <= 0.0 {
                    return Err(invalid(key, "expected a positive amount"));
                }
                self.classifier.default_limit = limit;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Settings for the purchase classifier consulted during scans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// Remote endpoint; the local rule classifier is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "ClassifierConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "ClassifierConfig::default_limit_value")]
    pub default_limit: f64,
    #[serde(default = "ClassifierConfig::default_limits")]
    pub limits: BTreeMap<SpendCategory, f64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: Self::default_timeout_secs(),
            default_limit: Self::default_limit_value(),
            limits: Self::default_limits(),
        }
    }
}

impl ClassifierConfig {
    pub fn default_timeout_secs() -> u64 {
        5
    }

    pub fn default_limit_value() -> f64 {
        1000.0
    }

    pub fn default_limits() -> BTreeMap<SpendCategory, f64> {
        BTreeMap::from([
            (SpendCategory::Dining, 500.0),
            (SpendCategory::Shopping, 300.0),
            (SpendCategory::Transportation, 200.0),
        ])
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| invalid(key, "expected a number"))
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
