//! Config management use case

use crate::error::Result;
use crate::infrastructure::config::SETTINGS_KEYS;
use crate::infrastructure::{FileSystemVault, Settings};

/// Service for managing vault settings
pub struct ConfigService {
    vault: FileSystemVault,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(vault: FileSystemVault) -> Self {
        ConfigService { vault }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        self.vault.load_settings()?.get(key)
    }

    /// Set a config value and persist it
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut settings = self.vault.load_settings()?;
        settings.set(key, value)?;
        self.vault.save_settings(&settings)
    }

    /// List all config values as (key, value) pairs
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        let settings: Settings = self.vault.load_settings()?;
        SETTINGS_KEYS
            .iter()
            .map(|key| Ok((*key, settings.get(key)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::error::TagnormError;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        let service = ConfigService::new(FileSystemVault::new(temp.path().to_path_buf()));
        (temp, service)
    }

    #[test]
    fn test_set_persists_value() {
        let (temp, service) = service();

        service.set("separator", "snake").unwrap();

        assert_eq!(service.get("separator").unwrap(), "snake");
        let content = std::fs::read_to_string(temp.path().join(".tagnorm/config.toml")).unwrap();
        assert!(content.contains("separator = \"snake\""));
    }

    #[test]
    fn test_list_covers_every_key() {
        let (_temp, service) = service();

        let entries = service.list().unwrap();
        let keys: Vec<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, SETTINGS_KEYS.to_vec());
        assert!(entries.contains(&("case", "lowercase".to_string())));
    }

    #[test]
    fn test_unknown_key_fails() {
        let (_temp, service) = service();

        assert!(matches!(service.get("mode"), Err(TagnormError::Config(_))));
        assert!(matches!(service.set("mode", "x"), Err(TagnormError::Config(_))));
    }
}
