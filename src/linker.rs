use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};

use crate::conflict::{classify, render_diff, Confirm, TargetState};
use crate::entry::ConfigEntry;
use crate::error::EntryError;
use crate::fs_util::ensure_dir;
use crate::report::{self, RunStats};

/// Policy switches for one run. Built once from flags and settings.
#[derive(Debug, Clone, Copy)]
pub struct LinkOptions {
    pub dry_run: bool,
    pub force: bool,
    pub verbose: bool,
    /// Remove whatever occupies a link target before linking
    pub overwrite: bool,
    /// Remove links without recreating them
    pub delete_only: bool,
    /// A missing destination directory fails the entry instead of being created
    pub fail_safe: bool,
    /// Link directory sources under their own basename
    pub fold_directories: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            force: false,
            verbose: false,
            overwrite: false,
            delete_only: false,
            fail_safe: true,
            fold_directories: true,
        }
    }
}

impl LinkOptions {
    fn removes_conflicts(&self) -> bool {
        self.overwrite || self.delete_only
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    /// Something was removed from the target and the link took its place
    Replaced { removed: PathBuf },
    /// Delete mode removed the target
    Removed { path: PathBuf },
    /// Delete mode found nothing to remove
    Unchanged,
    /// Dry run; nothing touched
    Planned { link: bool, removal: Option<PathBuf> },
    /// The user answered no at the overwrite prompt
    Declined,
}

enum Resolution {
    Clear,
    Removed(PathBuf),
    WouldRemove(PathBuf),
    Declined,
}

pub struct Linker<C> {
    options: LinkOptions,
    confirm: C,
    stats: RunStats,
}

impl<C: Confirm> Linker<C> {
    pub fn new(options: LinkOptions, confirm: C) -> Self {
        Self {
            options,
            confirm,
            stats: RunStats::default(),
        }
    }

    #[cfg(test)]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Reconcile every entry in order. Entry failures are reported and skipped.
    pub fn run(&mut self, entries: &[ConfigEntry]) -> RunStats {
        for entry in entries {
            match self.reconcile(entry) {
                Ok(outcome) => report::print_outcome(entry, &outcome, &self.options),
                Err(e) => {
                    self.stats.failed += 1;
                    report::error(format!("{} ==> {}", e, entry.display_name));
                    if e.is_already_exists() && !self.options.overwrite {
                        log::info!("run with --overwrite to replace it");
                    }
                }
            }
        }
        self.stats.clone()
    }

    /// Bring the link for one entry in line with the mapping.
    pub fn reconcile(&mut self, entry: &ConfigEntry) -> Result<LinkOutcome, EntryError> {
        validate_source(&entry.source)?;
        self.validate_dest(&entry.dest_dir)?;

        if !self.options.dry_run {
            ensure_dir(&entry.dest_dir)?;
        }

        let target = entry.link_target(self.options.fold_directories);
        log::debug!("source: {}", entry.source.display());
        log::debug!("destination: {}", entry.dest_dir.display());
        log::debug!("link: {}", target.display());

        if same_location(&target, &entry.source) {
            return Err(EntryError::TargetIsSource { path: target });
        }

        let mut removed = None;
        let mut planned_removal = None;

        if self.options.removes_conflicts() {
            match self.resolve_conflict(entry, &target)? {
                Resolution::Clear => {}
                Resolution::Removed(path) => removed = Some(path),
                Resolution::WouldRemove(path) => planned_removal = Some(path),
                Resolution::Declined => {
                    log::info!("kept existing {}", target.display());
                    self.stats.declined += 1;
                    return Ok(LinkOutcome::Declined);
                }
            }
        }

        if self.options.delete_only {
            return Ok(match (removed, planned_removal) {
                (Some(path), _) => {
                    self.stats.applied += 1;
                    LinkOutcome::Removed { path }
                }
                (None, Some(path)) => LinkOutcome::Planned {
                    link: false,
                    removal: Some(path),
                },
                (None, None) => LinkOutcome::Unchanged,
            });
        }

        if self.options.dry_run {
            return Ok(LinkOutcome::Planned {
                link: true,
                removal: planned_removal,
            });
        }

        match unix_fs::symlink(&entry.source, &target) {
            Ok(()) => {
                self.stats.applied += 1;
                Ok(match removed {
                    Some(removed) => LinkOutcome::Replaced { removed },
                    None => LinkOutcome::Linked,
                })
            }
            Err(source) => {
                // The removal already changed the filesystem
                if removed.is_some() {
                    self.stats.applied += 1;
                }
                Err(EntryError::LinkCreateFailed {
                    path: target,
                    source,
                })
            }
        }
    }

    fn validate_dest(&self, dest_dir: &Path) -> Result<(), EntryError> {
        match fs::metadata(dest_dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Err(_) if !self.options.fail_safe => {
                log::debug!("destination {} will be created", dest_dir.display());
                Ok(())
            }
            _ => Err(EntryError::DestNotFound {
                path: dest_dir.to_path_buf(),
            }),
        }
    }

    fn resolve_conflict(
        &mut self,
        entry: &ConfigEntry,
        target: &Path,
    ) -> Result<Resolution, EntryError> {
        match classify(target) {
            TargetState::Absent => Ok(Resolution::Clear),
            TargetState::Directory => {
                log::debug!("{} is a directory; left in place", target.display());
                Ok(Resolution::Clear)
            }
            TargetState::Symlink => self.remove(target),
            TargetState::RegularFile => {
                if !self.options.force && !self.options.dry_run {
                    let preview = render_diff(&entry.source, target);
                    let proceed = self
                        .confirm
                        .confirm(&preview)
                        .map_err(EntryError::Prompt)?;
                    if !proceed {
                        return Ok(Resolution::Declined);
                    }
                }
                self.remove(target)
            }
        }
    }

    fn remove(&self, target: &Path) -> Result<Resolution, EntryError> {
        if self.options.dry_run {
            return Ok(Resolution::WouldRemove(target.to_path_buf()));
        }

        fs::remove_file(target).map_err(|source| EntryError::LinkRemoveFailed {
            path: target.to_path_buf(),
            source,
        })?;
        log::debug!("removed {}", target.display());

        Ok(Resolution::Removed(target.to_path_buf()))
    }
}

/// Compares by canonical parent plus file name so the final component is
/// never followed.
fn same_location(target: &Path, source: &Path) -> bool {
    located(target) == located(source)
}

fn located(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn validate_source(source: &Path) -> Result<(), EntryError> {
    match fs::symlink_metadata(source) {
        Ok(meta) if meta.is_file() || meta.is_dir() => Ok(()),
        _ => Err(EntryError::SourceNotFound {
            path: source.to_path_buf(),
        }),
    }
}
