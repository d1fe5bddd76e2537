//! Tag system

pub mod enumerate;
pub mod rewrite;
pub mod scanner;
pub mod transform;

// Re-export main types
pub use enumerate::{summarize, TagChange, TagSummary};
pub use rewrite::{RenameRequest, TextRewrite, TAG_FIELDS};
pub use scanner::{scan_inline_tags, strip_marker, TagSpan, MARKER};
pub use transform::{transform_segment, transform_tag, CaseStrategy, SeparatorStrategy, TransformConfig};
