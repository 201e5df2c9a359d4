use anyhow::Result;
use std::path::Path;

use crate::config::{load_mapping, GlobalConfig};
use crate::conflict::TerminalConfirm;
use crate::linker::{LinkOptions, Linker};
use crate::report;

/// Reconcile every mapping entry. Also serves `neostow delete` through
/// `options.delete_only`.
pub fn run(
    config: &GlobalConfig,
    mapping_path: &Path,
    max_entries: usize,
    options: LinkOptions,
) -> Result<()> {
    let mapping = load_mapping(mapping_path, config.settings.orientation, max_entries)?;

    if mapping.entries.is_empty() {
        println!("No entries in {}", mapping_path.display());
    }

    let mut linker = Linker::new(options, TerminalConfirm::stdio());
    let stats = linker.run(&mapping.entries);

    if stats.failed > 0 || stats.declined > 0 {
        log::info!("{} failed, {} declined", stats.failed, stats.declined);
    }

    report::print_summary(&stats, options.dry_run);

    Ok(())
}
