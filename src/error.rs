//! Error types for tagnorm

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagnorm
#[derive(Debug, Error)]
pub enum TagnormError {
    #[error("Not a tagnorm vault: {0}")]
    NotVaultDirectory(PathBuf),

    #[error("Invalid rename: {0}")]
    InvalidRename(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid frontmatter in {document}: {source}")]
    Frontmatter {
        document: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),
}

impl TagnormError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagnormError::NotVaultDirectory(_) => 2,
            TagnormError::InvalidRename(_) => 3,
            TagnormError::DocumentNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagnormError::NotVaultDirectory(path) => {
                format!(
                    "Not a tagnorm vault: {}\n\n\
                    Suggestions:\n\
                    • Run 'tagnorm init' in your notes directory\n\
                    • Pass the vault explicitly with --vault <PATH>\n\
                    • Set TAGNORM_ROOT environment variable to your vault path",
                    path.display()
                )
            }
            TagnormError::InvalidRename(detail) => {
                format!(
                    "Invalid rename: {}\n\n\
                    Both the old and the new tag must be non-empty \
                    (a leading '#' is optional).\n\
                    Example: tagnorm rename '#brwoser' browser",
                    detail
                )
            }
            TagnormError::DocumentNotFound(name) => {
                format!(
                    "Document not found: {}\n\n\
                    Suggestions:\n\
                    • Document paths are relative to the vault root\n\
                    • Only .md files outside hidden directories are documents",
                    name
                )
            }
            TagnormError::Config(msg) => {
                if msg.contains("Invalid case") || msg.contains("Invalid separator") {
                    format!(
                        "{}\n\n\
                        Example: tagnorm config separator kebab",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagnormError
pub type Result<T> = std::result::Result<T, TagnormError>;
