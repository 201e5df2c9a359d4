use anyhow::Result;
use std::path::Path;

use crate::config::{load_mapping, GlobalConfig};
use crate::conflict::{classify, render_diff, TargetState};

pub fn run(
    config: &GlobalConfig,
    mapping_path: &Path,
    max_entries: usize,
    fold_directories: bool,
) -> Result<()> {
    let mapping = load_mapping(mapping_path, config.settings.orientation, max_entries)?;
    let mut found_diff = false;

    for entry in &mapping.entries {
        let target = entry.link_target(fold_directories);

        // Only plain files stand between an entry and its link
        if classify(&target) != TargetState::RegularFile || !entry.source.exists() {
            continue;
        }

        print!("{}", render_diff(&entry.source, &target));
        println!();
        found_diff = true;
    }

    if !found_diff {
        println!("No differences found.");
    }

    Ok(())
}
