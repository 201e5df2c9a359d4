use std::fs;
use std::path::{Path, PathBuf};

use crate::conflict::{classify, TargetState};
use crate::entry::ConfigEntry;

#[derive(Debug, Default)]
pub struct StatusCounts {
    pub linked: usize,
    pub foreign: usize,
    pub missing: usize,
    pub conflict: usize,
    pub invalid: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// Symlink pointing at the entry's source
    Linked,
    /// Symlink pointing somewhere else
    Foreign(PathBuf),
    /// Nothing at the link target yet
    Missing,
    /// A regular file or directory occupies the link target
    Conflict,
    /// Source or destination does not exist
    Invalid(String),
}

impl StatusCounts {
    pub fn record(&mut self, status: &EntryStatus) {
        match status {
            EntryStatus::Linked => self.linked += 1,
            EntryStatus::Foreign(_) => self.foreign += 1,
            EntryStatus::Missing => self.missing += 1,
            EntryStatus::Conflict => self.conflict += 1,
            EntryStatus::Invalid(_) => self.invalid += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.linked + self.foreign + self.missing + self.conflict + self.invalid
    }
}

pub fn check_entry_status(entry: &ConfigEntry, fold_directories: bool) -> EntryStatus {
    if !entry.source.exists() {
        return EntryStatus::Invalid("source not found".to_string());
    }
    if !entry.dest_dir.is_dir() {
        return EntryStatus::Invalid("destination not found".to_string());
    }

    let target = entry.link_target(fold_directories);

    match classify(&target) {
        TargetState::Absent => EntryStatus::Missing,
        TargetState::RegularFile | TargetState::Directory => EntryStatus::Conflict,
        TargetState::Symlink => {
            let Ok(link_target) = fs::read_link(&target) else {
                return EntryStatus::Conflict;
            };

            let resolved = if link_target.is_absolute() {
                link_target
            } else {
                target.parent().unwrap_or(Path::new("")).join(&link_target)
            };

            if resolved == entry.source || same_file(&resolved, &entry.source) {
                EntryStatus::Linked
            } else {
                EntryStatus::Foreign(resolved)
            }
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
