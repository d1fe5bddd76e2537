//! Application layer - Use cases and orchestration

pub mod driver;
pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod normalize;
pub mod notice;
pub mod rename;

pub use driver::{DocumentChange, RunReport};
pub use list_tags::{ListTagsService, ListingReport};
pub use manage_config::ConfigService;
pub use normalize::{normalize_tags, NormalizeOptions};
pub use notice::{Notice, Notifier};
pub use rename::{rename_tag, RenameOptions};
