use clap::Parser;
use std::path::{Path, PathBuf};
use tagnorm::application::{
    init::init, normalize_tags, rename_tag, ConfigService, ListTagsService, NormalizeOptions,
    RenameOptions,
};
use tagnorm::cli::{
    format_run_report, format_tag_list, format_tag_summary, Cli, Commands, ConsoleNotifier,
};
use tagnorm::error::{Result, TagnormError};
use tagnorm::infrastructure::{FileSystemVault, Settings};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Locate the vault and load its settings; code exclusion follows the settings.
fn open_vault(explicit: Option<&Path>) -> Result<(FileSystemVault, Settings)> {
    let vault = match explicit {
        Some(path) => FileSystemVault::discover_from(path)?,
        None => FileSystemVault::discover()?,
    };
    let settings = vault.load_settings()?;
    let vault = vault.with_skip_code(settings.skip_code);
    Ok((vault, settings))
}

fn run(cli: Cli) -> Result<()> {
    let explicit = cli.vault.as_deref();
    let mut notifier = ConsoleNotifier;

    match cli.command {
        Commands::Init { path } => {
            let path = match (path, explicit) {
                (Some(_), Some(_)) => {
                    return Err(TagnormError::Config(
                        "Pass the directory to init either as PATH or with --vault, not both"
                            .to_string(),
                    ))
                }
                (Some(path), None) => path,
                (None, Some(vault)) => vault.to_path_buf(),
                (None, None) => PathBuf::from("."),
            };
            init(&path)?;
            println!("Initialized tagnorm vault at {}", path.display());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let (vault, _) = open_vault(explicit)?;
            let service = ConfigService::new(vault);

            if list {
                for (key, value) in service.list()? {
                    println!("{} = {}", key, value);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                Err(TagnormError::Config(
                    "Usage: tagnorm config [--list | <key> [<value>]]".to_string(),
                ))
            }
        }
        Commands::Normalize { documents, dry_run } => {
            let (vault, settings) = open_vault(explicit)?;
            let options = NormalizeOptions { documents, dry_run };
            let report = normalize_tags(&vault, &settings, &options, &mut notifier)?;
            print!("{}", format_run_report(&report));
            Ok(())
        }
        Commands::Rename {
            old_tag,
            new_tag,
            dry_run,
        } => {
            let (vault, settings) = open_vault(explicit)?;
            let options = RenameOptions {
                old_tag,
                new_tag,
                dry_run,
            };
            let report = rename_tag(&vault, &settings, &options, &mut notifier)?;
            print!("{}", format_run_report(&report));
            Ok(())
        }
        Commands::Preview { all } => {
            let (vault, settings) = open_vault(explicit)?;
            let service = ListTagsService::new(&vault, &settings);
            let summary = service.preview()?;
            println!("{}", format_tag_summary(&summary, all).trim_end());
            Ok(())
        }
        Commands::List { print } => {
            let (vault, settings) = open_vault(explicit)?;
            let service = ListTagsService::new(&vault, &settings);
            if print {
                println!("{}", format_tag_list(&service.tags()?).trim_end());
            } else {
                service.write_listing(&mut notifier)?;
            }
            Ok(())
        }
    }
}
