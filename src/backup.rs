use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::foundation::error::{WatermarkError, WatermarkResult};

/// `photo.jpg` -> `photo.jpg.bak`, in the same directory.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// Copy every file to its `.bak` sibling, stopping at the first failure.
///
/// Existing backups are overwritten. On error, backups made before the failing file remain.
pub fn backup_all<P: AsRef<Path>>(paths: &[P]) -> WatermarkResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let dst = backup_path(path);
        std::fs::copy(path, &dst).map_err(|e| WatermarkError::backup(path, e.to_string()))?;
        tracing::debug!(src = %path.display(), dst = %dst.display(), "backed up");
        written.push(dst);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../tests/unit/backup.rs"]
mod tests;
