//! Persistent user preferences for the expense shell.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::{ExpenseError, Result},
    ledger::{Category, DEFAULT_DATE_FORMAT},
    storage::DEFAULT_SLOT,
};

/// Keys accepted by `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "date_format",
    "default_category",
    "storage_slot",
    "ui_color_enabled",
    "plain_output",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub default_category: Category,
    #[serde(default = "Config::default_storage_slot")]
    pub storage_slot: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: Self::default_date_format(),
            default_category: Category::default(),
            storage_slot: Self::default_storage_slot(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    pub fn default_date_format() -> String {
        DEFAULT_DATE_FORMAT.into()
    }

    pub fn default_storage_slot() -> String {
        DEFAULT_SLOT.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Applies a `config set <key> <value>` assignment.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim().to_ascii_lowercase().as_str() {
            "date_format" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ExpenseError::InvalidInput(
                        "date_format must not be empty".into(),
                    ));
                }
                if !is_valid_date_format(value) {
                    return Err(ExpenseError::InvalidInput(format!(
                        "`{}` is not a valid strftime date format",
                        value
                    )));
                }
                self.date_format = value.to_string();
            }
            "default_category" => self.default_category = value.parse()?,
            "storage_slot" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ExpenseError::InvalidInput(
                        "storage_slot must not be empty".into(),
                    ));
                }
                self.storage_slot = value.to_string();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(value)?,
            "plain_output" => self.plain_output = parse_bool(value)?,
            other => {
                return Err(ExpenseError::InvalidInput(format!(
                    "unknown config key `{}` (expected one of {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("date_format", self.date_format.clone()),
            ("default_category", self.default_category.to_string()),
            ("storage_slot", self.storage_slot.clone()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("plain_output", self.plain_output.to_string()),
        ]
    }
}

/// True when every strftime specifier in `format` is one chrono understands.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ExpenseError::InvalidInput(format!(
            "expected a boolean, got `{}`",
            other
        ))),
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self::new(PathResolver::config_file_in(&base)))
    }

    pub fn default_manager() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ExpenseError::ConfigError(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Like [`ConfigManager::load`], but an unreadable file is logged and
    /// replaced by defaults so the shell can still start.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.config_path.display(),
                    "unreadable config; using defaults"
                );
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ExpenseError::ConfigError(err.to_string()))?;
        write_atomic(&self.config_path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_slot, "expenses");
        assert_eq!(config.default_category, Category::Food);
    }

    #[test]
    fn saved_config_roundtrips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_value("default_category", "bills").unwrap();
        config.set_value("plain_output", "yes").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.default_category, Category::Bills);
        assert!(loaded.plain_output);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), r#"{"date_format":"%d.%m.%Y"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.date_format, "%d.%m.%Y");
        assert!(loaded.ui_color_enabled);
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), "{").unwrap();
        assert!(matches!(manager.load(), Err(ExpenseError::ConfigError(_))));
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn set_value_rejects_unknown_keys_and_values() {
        let mut config = Config::default();
        assert!(config.set_value("currency", "EUR").is_err());
        assert!(config.set_value("plain_output", "maybe").is_err());
        assert!(config.set_value("default_category", "Travel").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn set_value_rejects_unknown_date_specifiers() {
        let mut config = Config::default();
        let err = config.set_value("date_format", "%Q").unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidInput(_)));
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);

        config.set_value("date_format", "%d %b %Y").unwrap();
        assert_eq!(config.date_format, "%d %b %Y");
    }
}
