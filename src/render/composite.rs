use crate::foundation::core::{Anchor, Offset, Opacity, PixelBuffer, Rgba8};

/// Offset of the watermark's top-left corner inside a `target`-sized image.
///
/// Negative components mean the watermark overhangs the target on that side.
pub fn placement_offset(anchor: Anchor, target: (u32, u32), watermark: (u32, u32)) -> Offset {
    let dx = i64::from(target.0) - i64::from(watermark.0);
    let dy = i64::from(target.1) - i64::from(watermark.1);
    let (x, y) = match anchor {
        Anchor::TopLeft => (0, 0),
        Anchor::TopRight => (dx, 0),
        Anchor::BottomLeft => (0, dy),
        Anchor::BottomRight => (dx, dy),
        Anchor::Center => (dx.div_euclid(2), dy.div_euclid(2)),
    };
    Offset { x, y }
}

/// Straight-alpha "over": `src` scaled by `opacity` on top of `dst`.
pub fn over(dst: Rgba8, src: Rgba8, opacity: f32) -> Rgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = unit(src[3]) * opacity;
    let inv = 1.0 - sa;

    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = to_u8(unit(src[i]) * sa + unit(dst[i]) * inv);
    }
    out[3] = to_u8(sa + unit(dst[3]) * inv);
    out
}

/// Composite `watermark` onto a copy of `target` at the `anchor` position.
///
/// The part of the watermark that falls outside the target is clipped. The result always has
/// the target's dimensions and pixels outside the watermark are copied through untouched.
#[tracing::instrument(
    skip(target, watermark),
    fields(target_size = ?target.dimensions(), watermark_size = ?watermark.dimensions())
)]
pub fn place_and_blend(
    target: &PixelBuffer,
    watermark: &PixelBuffer,
    anchor: Anchor,
    opacity: Opacity,
) -> PixelBuffer {
    let mut out = target.clone();
    let off = placement_offset(anchor, target.dimensions(), watermark.dimensions());
    tracing::debug!(x = off.x, y = off.y, "watermark offset");

    let Some(region) = visible_region(off, target.dimensions(), watermark.dimensions()) else {
        return out;
    };

    let op = opacity.get();
    for ty in region.y0..region.y1 {
        let wy = (i64::from(ty) - off.y) as u32;
        for tx in region.x0..region.x1 {
            let wx = (i64::from(tx) - off.x) as u32;
            let (Some(dst), Some(src)) = (target.pixel(tx, ty), watermark.pixel(wx, wy)) else {
                continue;
            };
            out.put_pixel(tx, ty, over(dst, src, op));
        }
    }
    out
}

/// Target-space rectangle (half-open) covered by the placed watermark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

fn visible_region(off: Offset, target: (u32, u32), watermark: (u32, u32)) -> Option<Region> {
    let x0 = off.x.max(0);
    let y0 = off.y.max(0);
    let x1 = (off.x + i64::from(watermark.0)).min(i64::from(target.0));
    let y1 = (off.y + i64::from(watermark.1)).min(i64::from(target.1));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Region {
        x0: x0 as u32,
        y0: y0 as u32,
        x1: x1 as u32,
        y1: y1 as u32,
    })
}

fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
