mod commands;
mod config;
mod conflict;
mod entry;
mod error;
mod expand;
mod fs_util;
mod linker;
mod logger;
mod orientation;
mod report;
mod status;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::env;
use std::process;

use crate::config::GlobalConfig;
use crate::linker::LinkOptions;

#[derive(Parser)]
#[command(name = "neostow")]
#[command(about = "The declarative GNU Stow")]
struct Cli {
    /// Load an alternative config
    #[arg(
        short = 'f',
        long = "file",
        visible_short_alias = 'c',
        visible_alias = "config",
        value_name = "CONFIG",
        global = true
    )]
    file: Option<String>,

    /// Enables debug verbosity
    #[arg(short = 'D', long, global = true)]
    debug: bool,

    /// Describe potential operations
    #[arg(short = 'd', long = "dry", global = true)]
    dry_run: bool,

    /// Overwrite existing symlinks
    #[arg(short = 'o', long, global = true)]
    overwrite: bool,

    /// Skip prompt dialogs
    #[arg(short = 'F', long, global = true)]
    force: bool,

    /// Enable verbosity
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    /// Create missing destination directories instead of failing
    #[arg(long, global = true)]
    create_dirs: bool,

    /// Link directories under their display name instead of their own basename
    #[arg(long, global = true)]
    no_fold: bool,

    /// Maximum number of mapping entries
    #[arg(long, value_name = "N", global = true)]
    max_entries: Option<usize>,

    /// Displays program version
    #[arg(short = 'v', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate autocompletion for a shell
    Autocomplete {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Edit the configuration file
    Edit,

    /// Delete symlinks
    Delete,

    /// Show the state of every link target
    Status,

    /// Show differences for link targets occupied by regular files
    Diff,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    logger::init(cli.verbose, cli.debug);

    if let Err(err) = run(cli) {
        report::fatal(format!("{:#}", err));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = GlobalConfig::load()?;
    let cwd = env::current_dir().context("Failed to get current working directory")?;
    let mapping_path = config.mapping_path(cli.file.as_deref(), &cwd);
    let max_entries = cli.max_entries.unwrap_or(config.settings.max_entries);
    let fold_directories = config.settings.fold_directories && !cli.no_fold;
    let delete = matches!(cli.command, Some(Commands::Delete));

    log::debug!(
        "mapping file: {} ({})",
        mapping_path.display(),
        config.settings.orientation
    );

    let options = LinkOptions {
        dry_run: cli.dry_run,
        force: cli.force,
        verbose: cli.verbose,
        overwrite: cli.overwrite || delete,
        delete_only: delete,
        fail_safe: config.settings.fail_safe && !cli.create_dirs,
        fold_directories,
    };

    match cli.command {
        Some(Commands::Autocomplete { shell }) => commands::autocomplete::run(shell),
        Some(Commands::Edit) => commands::edit::run(&config, &mapping_path),
        Some(Commands::Status) => {
            commands::status::run(&config, &mapping_path, max_entries, fold_directories)
        }
        Some(Commands::Diff) => {
            commands::diff::run(&config, &mapping_path, max_entries, fold_directories)
        }
        Some(Commands::Delete) | None => {
            commands::link::run(&config, &mapping_path, max_entries, options)
        }
    }
}
