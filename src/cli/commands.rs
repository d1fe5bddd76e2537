//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagnorm")]
#[command(about = "Normalize and rename tags across a folder of Markdown notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Vault directory (default: discovered from TAGNORM_ROOT or the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub vault: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new vault
    Init {
        /// Directory to initialize (default: --vault, else the current directory)
        path: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Normalize every tag using the configured rules
    Normalize {
        /// Documents to normalize, relative to the vault root (default: all)
        #[arg(value_name = "DOCUMENT")]
        documents: Vec<String>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename a tag and every tag nested under it
    Rename {
        /// Tag to rename (leading '#' optional)
        old_tag: String,

        /// New tag name (leading '#' optional)
        new_tag: String,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how many tags normalization would change
    Preview {
        /// Show every tag, not just the ones that would change
        #[arg(short, long)]
        all: bool,
    },

    /// Write all distinct tags to the listing document
    List {
        /// Print the tags instead of writing the listing document
        #[arg(short, long)]
        print: bool,
    },
}
