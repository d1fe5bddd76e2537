//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{format_run_report, format_tag_list, format_tag_summary, ConsoleNotifier};
