//! Configuration management

use crate::domain::{CaseStrategy, SeparatorStrategy, TransformConfig};
use crate::error::{Result, TagnormError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Directory marking a vault root.
pub const VAULT_DIR: &str = ".tagnorm";

/// Boolean key written by older versions; `true` meant snake separators.
pub const LEGACY_SNAKE_CASE_KEY: &str = "snakeCase";

/// Persisted settings keys, in display order.
pub const SETTINGS_KEYS: [&str; 6] = [
    "case",
    "separator",
    "removeSpecialChars",
    "applyToNested",
    "skipCode",
    "listingName",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub case: CaseStrategy,
    pub separator: SeparatorStrategy,
    pub remove_special_chars: bool,
    pub apply_to_nested: bool,
    /// Leave tags inside code spans and code blocks alone
    pub skip_code: bool,
    /// Vault-relative name of the generated tag listing
    pub listing_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            case: CaseStrategy::Lowercase,
            separator: SeparatorStrategy::Preserve,
            remove_special_chars: false,
            apply_to_nested: true,
            skip_code: false,
            listing_name: "Tag List.md".to_string(),
        }
    }
}

/// Outcome of upgrading a raw settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsMigration {
    pub table: toml::Table,
    /// The table differs from what was read and should be written back
    pub rewritten: bool,
}

/// Translate legacy keys in a raw settings table.
///
/// `snakeCase = true` becomes `separator = "snake"`, `false` becomes
/// `"preserve"`; the legacy key is then removed. Keys this version does not
/// know are kept as they are.
pub fn migrate_settings(mut table: toml::Table) -> SettingsMigration {
    let Some(legacy) = table.remove(LEGACY_SNAKE_CASE_KEY) else {
        return SettingsMigration {
            table,
            rewritten: false,
        };
    };

    if let Some(snake) = legacy.as_bool() {
        let separator = if snake {
            SeparatorStrategy::Snake
        } else {
            SeparatorStrategy::Preserve
        };
        table.insert(
            "separator".to_string(),
            toml::Value::String(separator.to_string()),
        );
    }

    SettingsMigration {
        table,
        rewritten: true,
    }
}

impl Settings {
    /// The rules used by the transformer.
    pub fn transform(&self) -> TransformConfig {
        TransformConfig {
            case: self.case,
            separator: self.separator,
            remove_special_chars: self.remove_special_chars,
            apply_to_nested: self.apply_to_nested,
        }
    }

    /// Load settings from .tagnorm/config.toml in the given directory.
    ///
    /// Legacy keys are migrated and the file is rewritten when that happens.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let vault_dir = path.join(VAULT_DIR);
        if !vault_dir.is_dir() {
            return Err(TagnormError::NotVaultDirectory(path.to_path_buf()));
        }

        let config_path = vault_dir.join("config.toml");
        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", config_path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(TagnormError::Io(e)),
        };

        let table: toml::Table = toml::from_str(&contents)
            .map_err(|e| TagnormError::Config(format!("Failed to parse config.toml: {}", e)))?;
        let migration = migrate_settings(table);

        if migration.rewritten {
            tracing::info!("Migrated legacy settings in {}", config_path.display());
            fs::write(&config_path, toml::to_string_pretty(&migration.table)?)?;
        }

        toml::Value::Table(migration.table)
            .try_into::<Settings>()
            .map_err(|e| TagnormError::Config(format!("Invalid config.toml: {}", e)))
    }

    /// Save settings to .tagnorm/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let vault_dir = path.join(VAULT_DIR);
        let config_path = vault_dir.join("config.toml");

        if !vault_dir.exists() {
            fs::create_dir(&vault_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TagnormError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Read one setting by its persisted key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "case" => Ok(self.case.to_string()),
            "separator" => Ok(self.separator.to_string()),
            "removeSpecialChars" => Ok(self.remove_special_chars.to_string()),
            "applyToNested" => Ok(self.apply_to_nested.to_string()),
            "skipCode" => Ok(self.skip_code.to_string()),
            "listingName" => Ok(self.listing_name.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update one setting by its persisted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "case" => self.case = value.parse().map_err(TagnormError::Config)?,
            "separator" => self.separator = value.parse().map_err(TagnormError::Config)?,
            "removeSpecialChars" => self.remove_special_chars = parse_bool(key, value)?,
            "applyToNested" => self.apply_to_nested = parse_bool(key, value)?,
            "skipCode" => self.skip_code = parse_bool(key, value)?,
            "listingName" => {
                if value.trim().is_empty() {
                    return Err(TagnormError::Config(
                        "listingName cannot be empty".to_string(),
                    ));
                }
                self.listing_name = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        TagnormError::Config(format!(
            "Invalid value for '{}': '{}'. Expected true or false",
            key, value
        ))
    })
}

fn unknown_key(key: &str) -> TagnormError {
    TagnormError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        SETTINGS_KEYS.join(", ")
    ))
}
