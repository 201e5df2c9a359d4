use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single entry. Never aborts the run.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("destination not found: {}", path.display())]
    DestNotFound { path: PathBuf },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    #[error("link target is the source itself: {}", path.display())]
    TargetIsSource { path: PathBuf },

    #[error("failed to create link {}: {source}", path.display())]
    LinkCreateFailed { path: PathBuf, source: io::Error },

    #[error("failed to remove {}: {source}", path.display())]
    LinkRemoveFailed { path: PathBuf, source: io::Error },

    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] io::Error),
}

impl EntryError {
    /// True when link creation failed because something already occupies the target.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            EntryError::LinkCreateFailed { source, .. } if source.kind() == io::ErrorKind::AlreadyExists
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ConfigReadFailed { path: PathBuf, source: io::Error },

    #[error("too many entries (limit {limit}); truncated")]
    TooManyEntries { limit: usize },
}
