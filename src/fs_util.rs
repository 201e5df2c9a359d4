use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::error::EntryError;

const DIR_MODE: u32 = 0o700;

/// Create `path` and every missing ancestor with mode 0700.
///
/// Existing directories are left alone, so calling this twice is a no-op.
pub fn ensure_dir(path: &Path) -> Result<(), EntryError> {
    let mut prefix = PathBuf::new();

    for component in path.components() {
        prefix.push(component);

        match fs::metadata(&prefix) {
            Ok(meta) if meta.is_dir() => continue,
            Ok(_) => {
                return Err(EntryError::DirectoryCreateFailed {
                    path: prefix,
                    source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                });
            }
            Err(_) => {}
        }

        match DirBuilder::new().mode(DIR_MODE).create(&prefix) {
            Ok(()) => log::debug!("created directory {}", prefix.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(EntryError::DirectoryCreateFailed {
                    path: prefix,
                    source,
                });
            }
        }
    }

    Ok(())
}
