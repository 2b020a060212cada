use std::{io::Cursor, path::Path, sync::Arc};

use anyhow::Context;
use image::ImageDecoder as _;

use crate::{
    assets::svg_raster::rasterize_tree,
    foundation::core::PixelBuffer,
    foundation::error::{WatermarkError, WatermarkResult},
};

/// Decode encoded image bytes into straight RGBA8.
///
/// Sources without an alpha channel (JPEG, RGB PNG) come out fully opaque. EXIF orientation
/// is applied, so the buffer is upright as viewers display it.
pub fn decode_image(bytes: &[u8]) -> WatermarkResult<PixelBuffer> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| WatermarkError::decode(e.to_string()))?
        .into_decoder()
        .map_err(|e| WatermarkError::decode(e.to_string()))?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);

    let mut dyn_img = image::DynamicImage::from_decoder(decoder)
        .map_err(|e| WatermarkError::decode(e.to_string()))?;
    dyn_img.apply_orientation(orientation);

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

/// Read and decode a target image from disk.
pub fn load_target(path: &Path) -> WatermarkResult<PixelBuffer> {
    if !path.exists() {
        return Err(WatermarkError::missing_file(path));
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        WatermarkError::Decode(msg) => {
            WatermarkError::decode(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Parse SVG bytes into a `usvg` tree with default options (no system fonts).
pub fn parse_svg(bytes: &[u8]) -> WatermarkResult<usvg::Tree> {
    parse_svg_with_options(bytes, &usvg::Options::default())
}

fn parse_svg_with_options(bytes: &[u8], opts: &usvg::Options<'_>) -> WatermarkResult<usvg::Tree> {
    usvg::Tree::from_data(bytes, opts)
        .map_err(|e| WatermarkError::invalid_source(format!("parse svg tree: {e}")))
}

/// Validate, parse and rasterize the watermark file.
///
/// The path must carry an `.svg` extension and exist, checked in that order. Text in the SVG
/// resolves against system fonts plus any fonts sitting next to the watermark.
#[tracing::instrument]
pub fn load_watermark(path: &Path) -> WatermarkResult<PixelBuffer> {
    if !has_svg_extension(path) {
        return Err(WatermarkError::invalid_source(format!(
            "file '{}' is not an SVG file",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(WatermarkError::missing_file(path));
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("read watermark bytes from '{}'", path.display()))?;

    let resources_dir = path.parent().map(|p| p.to_path_buf());
    let fontdb = build_svg_fontdb(resources_dir.as_deref());
    let opts = usvg::Options {
        resources_dir,
        fontdb,
        ..Default::default()
    };

    let tree = parse_svg_with_options(&bytes, &opts)?;
    rasterize_tree(&tree)
}

pub(crate) fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn build_svg_fontdb(resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    if let Some(dir) = resources_dir {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }

    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
