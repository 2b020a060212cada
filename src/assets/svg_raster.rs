use crate::{
    assets::decode::parse_svg,
    foundation::core::PixelBuffer,
    foundation::error::{WatermarkError, WatermarkResult},
};

/// Largest raster edge we are willing to allocate for a watermark.
pub const MAX_DIM: u32 = 16_384;

/// Pixel size of an SVG at its intrinsic resolution (fractional sizes round up).
pub fn svg_raster_size(tree: &usvg::Tree) -> WatermarkResult<(u32, u32)> {
    fn to_px(v: f32) -> WatermarkResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(WatermarkError::invalid_source("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;

    if w > MAX_DIM || h > MAX_DIM {
        return Err(WatermarkError::invalid_source(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

/// Rasterize SVG bytes at their native size into a straight-alpha buffer.
pub fn rasterize_svg(bytes: &[u8]) -> WatermarkResult<PixelBuffer> {
    let tree = parse_svg(bytes)?;
    rasterize_tree(&tree)
}

/// Rasterize an already parsed tree. Unpainted pixels stay fully transparent.
#[tracing::instrument(skip(tree))]
pub fn rasterize_tree(tree: &usvg::Tree) -> WatermarkResult<PixelBuffer> {
    let (width, height) = svg_raster_size(tree)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| WatermarkError::invalid_source("failed to allocate svg pixmap"))?;

    resvg::render(
        tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied pixels; the compositor works on straight alpha.
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    tracing::debug!(width, height, "rasterized watermark");
    PixelBuffer::new(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
