use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::{load_mapping, GlobalConfig};
use crate::status::{check_entry_status, EntryStatus, StatusCounts};

pub fn run(
    config: &GlobalConfig,
    mapping_path: &Path,
    max_entries: usize,
    fold_directories: bool,
) -> Result<()> {
    let mapping = load_mapping(mapping_path, config.settings.orientation, max_entries)?;

    if mapping.entries.is_empty() {
        println!("No entries in {}", mapping_path.display());
        return Ok(());
    }

    let mut counts = StatusCounts::default();

    for entry in &mapping.entries {
        let status = check_entry_status(entry, fold_directories);
        counts.record(&status);

        let symbol = match &status {
            EntryStatus::Linked => "✓".green(),
            EntryStatus::Foreign(_) => "⊘".yellow(),
            EntryStatus::Missing => "?".red(),
            EntryStatus::Conflict => "!".red(),
            EntryStatus::Invalid(_) => "✗".red(),
        };
        let note = match &status {
            EntryStatus::Foreign(path) => format!(" (points to {})", path.display()),
            EntryStatus::Invalid(reason) => format!(" ({})", reason),
            EntryStatus::Missing => " (not linked)".to_string(),
            EntryStatus::Conflict => " (file exists, not a symlink)".to_string(),
            EntryStatus::Linked => String::new(),
        };
        println!(
            "  {} {}{}",
            symbol,
            entry.link_target(fold_directories).display(),
            note.dimmed()
        );
    }

    println!();
    println!("{} ({} entries):", mapping_path.display().to_string().bold(), counts.total());
    println!("  linked:   {}", counts.linked.to_string().green());
    if counts.foreign > 0 {
        println!("  foreign:  {}", counts.foreign.to_string().yellow());
    }
    if counts.missing > 0 {
        println!("  missing:  {}", counts.missing.to_string().red());
    }
    if counts.conflict > 0 {
        println!("  conflict: {}", counts.conflict.to_string().red());
    }
    if counts.invalid > 0 {
        println!("  invalid:  {}", counts.invalid.to_string().red());
    }

    Ok(())
}
