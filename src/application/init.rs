//! Initialize vault use case

use crate::error::Result;
use crate::infrastructure::{FileSystemVault, Settings};
use std::fs;
use std::path::Path;

/// Initialize a new vault at the specified path with default settings.
pub fn init(path: &Path) -> Result<Settings> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let vault = FileSystemVault::new(path.to_path_buf());
    vault.initialize()?;

    let settings = Settings::default();
    vault.save_settings(&settings)?;

    tracing::info!("Initialized vault at {}", path.display());
    Ok(settings)
}
