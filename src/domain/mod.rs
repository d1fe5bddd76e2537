//! Domain layer - Tag transformation and rewriting, free of I/O

pub mod tags;

pub use tags::{CaseStrategy, RenameRequest, SeparatorStrategy, TransformConfig};
