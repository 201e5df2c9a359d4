use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

use crate::config::GlobalConfig;

pub fn run(config: &GlobalConfig, mapping_path: &Path) -> Result<()> {
    let editor = config.editor();
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    log::debug!("opening {} with {}", mapping_path.display(), editor);

    let status = Command::new(program)
        .args(parts)
        .arg(mapping_path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor))?;

    if !status.success() {
        bail!("Editor exited with {}", status);
    }

    Ok(())
}
