use std::fmt::Display;

use colored::Colorize;

use crate::entry::ConfigEntry;
use crate::linker::{LinkOptions, LinkOutcome};

/// Counters for one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Entries whose link was created, replaced, or removed
    pub applied: usize,
    pub failed: usize,
    pub declined: usize,
}

pub fn error(message: impl Display) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn warn(message: impl Display) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

pub fn fatal(message: impl Display) {
    eprintln!("{} {}", "fatal:".red().bold(), message);
}

pub fn print_outcome(entry: &ConfigEntry, outcome: &LinkOutcome, options: &LinkOptions) {
    let name = entry.link_name(options.fold_directories);

    match outcome {
        LinkOutcome::Linked => {
            if options.verbose {
                println!("{} ==> {}", name, entry.dest_dir.display());
            }
        }
        LinkOutcome::Replaced { removed } => {
            if options.verbose {
                println!("{} {}", "replaced".yellow(), removed.display());
                println!("{} ==> {}", name, entry.dest_dir.display());
            }
        }
        LinkOutcome::Removed { path } => {
            if options.verbose {
                println!("{} {}", "removed".green(), path.display());
            }
        }
        LinkOutcome::Planned { link, removal } => {
            if let Some(path) = removal {
                println!("{} {}", "would remove".cyan(), path.display());
            }
            if *link {
                println!("{} ==> {}", name, entry.dest_dir.display());
            }
        }
        LinkOutcome::Unchanged => {
            if options.verbose {
                println!("{} {}", name, "(nothing to remove)".dimmed());
            }
        }
        LinkOutcome::Declined => {
            if options.verbose {
                println!("{} {}", name, "(kept existing file)".dimmed());
            }
        }
    }
}

/// Final line of a run.
pub fn summary_line(stats: &RunStats, dry_run: bool) -> String {
    if stats.applied == 0 && !dry_run {
        "no operations were applied.".to_string()
    } else {
        format!("{} operations were applied.", stats.applied)
    }
}

pub fn print_summary(stats: &RunStats, dry_run: bool) {
    println!("{}", summary_line(stats, dry_run));
    if dry_run {
        println!("{}", "(dry run - no changes made)".dimmed());
    }
}
