use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::ConfigEntry;
use crate::error::ConfigError;
use crate::expand::{expand_in, Environment, ProcessEnv};
use crate::orientation::Orientation;
use crate::report;

/// Global settings at ~/.config/neostow/config.toml
/// Optional - every field has a default
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GlobalConfig {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Mapping file, relative to the working directory unless absolute
    #[serde(default = "default_mapping_file")]
    pub file: String,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_true")]
    pub fail_safe: bool,
    #[serde(default = "default_true")]
    pub fold_directories: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default)]
    pub editor: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: default_mapping_file(),
            orientation: Orientation::default(),
            fail_safe: true,
            fold_directories: true,
            max_entries: default_max_entries(),
            editor: None,
        }
    }
}

fn default_mapping_file() -> String {
    ".neostow".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    1000
}

impl GlobalConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("neostow");

        Ok(config_dir.join("config.toml"))
    }

    /// Location of the mapping file; `file` overrides the setting.
    pub fn mapping_path(&self, file: Option<&str>, cwd: &Path) -> PathBuf {
        let raw = file.unwrap_or(&self.settings.file);
        let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
        if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        }
    }

    /// Editor for `neostow edit`: setting, then $EDITOR, then vim.
    pub fn editor(&self) -> String {
        self.settings
            .editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| "vim".to_string())
    }
}

/// Entries read from a mapping file, in file order.
#[derive(Debug, Default)]
pub struct Mapping {
    pub entries: Vec<ConfigEntry>,
}

pub fn load_mapping(
    path: &Path,
    orientation: Orientation,
    max_entries: usize,
) -> Result<Mapping, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read mapping file {}", path.display());

    Ok(parse_mapping(&content, orientation, max_entries, &ProcessEnv))
}

/// Parse mapping text. Bad lines are reported and skipped.
///
/// Each line is either `source=dest` (sides swapped for dest-first
/// orientation) or a bare path linked into the parent of its own directory,
/// so `pkg/bashrc` lands next to `pkg`. `#` starts a comment anywhere on a
/// line.
pub fn parse_mapping(
    content: &str,
    orientation: Orientation,
    max_entries: usize,
    env: &impl Environment,
) -> Mapping {
    let mut mapping = Mapping::default();

    for (index, raw) in content.lines().enumerate() {
        if raw.starts_with('#') || raw.chars().count() < 2 {
            continue;
        }

        let line = match raw.find('#') {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if mapping.entries.len() >= max_entries {
            report::warn(ConfigError::TooManyEntries { limit: max_entries });
            break;
        }

        match parse_line(line, orientation, env) {
            Ok(entry) => {
                log::debug!(
                    "line {}: {} -> {}",
                    index + 1,
                    entry.source.display(),
                    entry.dest_dir.display()
                );
                mapping.entries.push(entry);
            }
            Err(message) => report::error(format!("line {}: {}", index + 1, message)),
        }
    }

    mapping
}

fn parse_line(
    line: &str,
    orientation: Orientation,
    env: &impl Environment,
) -> std::result::Result<ConfigEntry, String> {
    let (source_token, source, dest_dir) = match line.split_once('=') {
        Some((left, right)) => {
            let (source_token, dest_token) = orientation.split(left.trim(), right.trim());
            if source_token.is_empty() {
                return Err(format!("missing source in '{}'", line));
            }
            if dest_token.is_empty() {
                return Err(format!("missing destination in '{}'", line));
            }
            (
                source_token,
                expand_in(source_token, env),
                expand_in(dest_token, env),
            )
        }
        None => {
            let source = expand_in(line, env);
            let dest_dir = source
                .parent()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .ok_or_else(|| format!("failed to get destination for {}", line))?;
            (line, source, dest_dir)
        }
    };

    let display_name = display_name(source_token, &source);
    Ok(ConfigEntry::new(display_name, source, dest_dir))
}

/// Basename of the token as written, or of the expanded path when the token
/// ends in something that only means anything after expansion.
fn display_name(token: &str, expanded: &Path) -> String {
    let base = Path::new(token.trim_end_matches('/'))
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if base.is_empty() || base == "~" || base == "." || base.starts_with('$') {
        return expanded
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| token.to_string());
    }

    base
}
