use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    encode::png::OutputPlan,
    foundation::error::{ErrorKind, WatermarkError, WatermarkResult},
};

/// Raster extensions accepted as watermark targets (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A target that was not processed, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

impl Rejection {
    pub fn from_error(path: &Path, err: &WatermarkError) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Partition of the requested targets into usable and skipped paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub accepted: Vec<PathBuf>,
    pub rejected: Vec<Rejection>,
}

/// Check a single target: extension first, then existence.
pub fn validate_target(path: &Path) -> WatermarkResult<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(WatermarkError::UnsupportedExtension {
            path: path.to_path_buf(),
            ext,
        });
    }
    if !path.exists() {
        return Err(WatermarkError::missing_file(path));
    }
    Ok(())
}

/// Validate every target; `accepted` keeps request order. Never fails as a whole.
///
/// Targets that would share an output file with another accepted target (`a.jpg` next to
/// `a.png`, or the same path twice) are rejected with [`WatermarkError::OutputCollision`].
pub fn validate_targets<P: AsRef<Path>>(paths: &[P]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let mut candidates = Vec::new();
    for path in paths {
        let path = path.as_ref();
        match validate_target(path) {
            Ok(()) => candidates.push(path.to_path_buf()),
            Err(e) => outcome.rejected.push(Rejection::from_error(path, &e)),
        }
    }

    let keys: Vec<(PathBuf, PathBuf)> = candidates.iter().map(|p| output_key(p)).collect();

    // Per output, the owner is the target already living there (written in place), else the
    // first one requested. Writing anything else there would clobber a pending source.
    let mut owners: HashMap<&Path, usize> = HashMap::new();
    for (i, (source, output)) in keys.iter().enumerate() {
        let in_place = source == output;
        let takes_over = match owners.get(output.as_path()).copied() {
            None => true,
            Some(j) => in_place && keys[j].0 != keys[j].1,
        };
        if takes_over {
            owners.insert(output.as_path(), i);
        }
    }

    for (i, path) in candidates.iter().enumerate() {
        let owner = owners[keys[i].1.as_path()];
        if owner == i {
            outcome.accepted.push(path.clone());
            continue;
        }
        let err = WatermarkError::OutputCollision {
            path: path.clone(),
            output: OutputPlan::for_target(path).output,
            claimed_by: candidates[owner].clone(),
        };
        outcome.rejected.push(Rejection::from_error(path, &err));
    }
    outcome
}

/// Canonical `(source, output)` pair so `./a.png` and `a.png` compare equal.
fn output_key(path: &Path) -> (PathBuf, PathBuf) {
    let source = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let output = OutputPlan::for_target(&source).output;
    (source, output)
}

#[cfg(test)]
#[path = "../tests/unit/validate.rs"]
mod tests;
