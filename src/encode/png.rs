use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use crate::{
    foundation::core::PixelBuffer,
    foundation::error::{WatermarkError, WatermarkResult},
};

/// Where a composited target is written and which file, if any, must go afterwards.
///
/// Output is always PNG: JPEG cannot carry the alpha channel of the composited result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPlan {
    pub output: PathBuf,
    /// Lossy original to delete once `output` is on disk.
    pub remove_after_write: Option<PathBuf>,
}

impl OutputPlan {
    pub fn for_target(original: &Path) -> Self {
        let is_png = original
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            return Self {
                output: original.to_path_buf(),
                remove_after_write: None,
            };
        }
        Self {
            output: original.with_extension("png"),
            remove_after_write: Some(original.to_path_buf()),
        }
    }
}

/// Result of a successful commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenOutput {
    pub source: PathBuf,
    pub output: PathBuf,
    pub removed_original: bool,
}

/// Serialize a buffer as an RGBA8 PNG.
pub fn encode_png(buffer: &PixelBuffer) -> WatermarkResult<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let img = image::RgbaImage::from_raw(width, height, buffer.as_raw().to_vec())
        .ok_or_else(|| WatermarkError::encoding("rgba buffer does not match its dimensions"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| WatermarkError::encoding(format!("encode png: {e}")))?;
    Ok(out)
}

/// Write `buffer` next to `original` as PNG, then drop a lossy original.
///
/// The two steps are not atomic: if removing the original fails, both files stay on disk and
/// an [`WatermarkError::Encoding`] is returned. Running the batch again is safe.
pub fn commit_png(buffer: &PixelBuffer, original: &Path) -> WatermarkResult<WrittenOutput> {
    let plan = OutputPlan::for_target(original);
    let bytes = encode_png(buffer)?;

    std::fs::write(&plan.output, bytes).map_err(|e| {
        WatermarkError::encoding(format!("write png '{}': {e}", plan.output.display()))
    })?;

    let mut removed_original = false;
    if let Some(old) = &plan.remove_after_write {
        std::fs::remove_file(old).map_err(|e| {
            WatermarkError::encoding(format!(
                "wrote '{}' but could not remove '{}': {e}",
                plan.output.display(),
                old.display()
            ))
        })?;
        removed_original = true;
    }

    Ok(WrittenOutput {
        source: original.to_path_buf(),
        output: plan.output,
        removed_original,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
