//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod frontmatter;
pub mod repository;

pub use config::Settings;
pub use repository::{DocumentStore, FileSystemVault};
