//! tagnorm - Tag normalization for Markdown notes
//!
//! Normalizes hierarchical `#tags` in YAML frontmatter and inline text
//! (case, separators, special characters, nested segments), renames one tag
//! and its nested tags across a vault, and lists every distinct tag.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagnormError;
