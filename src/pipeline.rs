use std::path::{Path, PathBuf};

use crate::{
    assets::decode::{load_target, load_watermark},
    backup::backup_all,
    config::WatermarkSettings,
    encode::png::{WrittenOutput, commit_png},
    foundation::core::{CompositeRequest, PixelBuffer},
    foundation::error::WatermarkResult,
    validate::{Rejection, validate_targets},
};

/// Knobs for a batch run that are not part of the watermark look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Copy each accepted target to `<name>.bak` before touching anything.
    pub backup: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// What happened to every requested target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<WrittenOutput>,
    /// Rejected during validation; never touched.
    pub skipped: Vec<Rejection>,
    /// Accepted and backed up, but decoding or writing failed.
    pub failed: Vec<Rejection>,
    pub backups: Vec<PathBuf>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Decode one target, stamp the watermark on it and commit the PNG.
pub fn process_target(
    path: &Path,
    watermark: &PixelBuffer,
    settings: &WatermarkSettings,
) -> WatermarkResult<WrittenOutput> {
    let target = load_target(path)?;
    let out = CompositeRequest {
        target,
        watermark,
        anchor: settings.anchor,
        opacity: settings.opacity,
    }
    .composite();
    commit_png(&out, path)
}

/// Watermark every usable target, one after another.
///
/// Errors about the watermark itself and backup failures abort the run before any target is
/// modified. Per-target problems are collected in the report and processing continues.
#[tracing::instrument(skip(targets, settings), fields(targets = targets.len()))]
pub fn run_batch<P: AsRef<Path>>(
    watermark_path: &Path,
    targets: &[P],
    settings: &WatermarkSettings,
    options: &BatchOptions,
) -> WatermarkResult<BatchReport> {
    let watermark = load_watermark(watermark_path)?;

    let outcome = validate_targets(targets);
    for r in &outcome.rejected {
        tracing::warn!(path = %r.path.display(), kind = ?r.kind, "skipping: {}", r.message);
    }

    let mut report = BatchReport {
        skipped: outcome.rejected,
        ..Default::default()
    };

    if options.backup {
        report.backups = backup_all(&outcome.accepted)?;
    }

    for path in &outcome.accepted {
        match process_target(path, &watermark, settings) {
            Ok(written) => {
                tracing::info!(
                    src = %written.source.display(),
                    out = %written.output.display(),
                    "watermarked"
                );
                report.written.push(written);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to watermark");
                report.failed.push(Rejection::from_error(path, &e));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
