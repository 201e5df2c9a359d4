use std::path::PathBuf;

/// One managed link, as read from the mapping file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Basename of the source token as written in the mapping file
    pub display_name: String,
    /// Expanded, canonical path of the thing being linked
    pub source: PathBuf,
    /// Expanded path of the directory that holds the link
    pub dest_dir: PathBuf,
}

impl ConfigEntry {
    pub fn new(display_name: impl Into<String>, source: PathBuf, dest_dir: PathBuf) -> Self {
        Self {
            display_name: display_name.into(),
            source,
            dest_dir,
        }
    }

    /// Full path of the link this entry manages.
    ///
    /// A directory source is linked under its own basename when folding is
    /// enabled, so the whole tree becomes a single link. Everything else is
    /// linked under `display_name`.
    pub fn link_target(&self, fold_directories: bool) -> PathBuf {
        self.dest_dir.join(self.link_name(fold_directories))
    }

    /// Name shown in `name ==> dest` report lines.
    pub fn link_name(&self, fold_directories: bool) -> String {
        if fold_directories && self.source.is_dir() {
            if let Some(name) = self.source.file_name() {
                return name.to_string_lossy().to_string();
            }
        }
        self.display_name.clone()
    }
}
