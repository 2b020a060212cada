use std::{fmt, str::FromStr};

use crate::foundation::error::{WatermarkError, WatermarkResult};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Rectangular RGBA8 pixel grid.
///
/// Pixels are straight alpha, row-major and tightly packed (`width * height * 4` bytes).
/// Dimensions are fixed at construction; there is no way to resize a buffer in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes. Both dimensions must be non-zero and `data` must match them.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> WatermarkResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(WatermarkError::Other(anyhow::anyhow!(
                "pixel buffer {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer where every pixel is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> WatermarkResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn byte_len(width: u32, height: u32) -> WatermarkResult<usize> {
    if width == 0 || height == 0 {
        return Err(WatermarkError::Other(anyhow::anyhow!(
            "pixel buffer dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| WatermarkError::Other(anyhow::anyhow!("pixel buffer size overflow")))
}

/// Reference point where the watermark's origin is placed inside the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    /// Canonical command-line name.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
            Anchor::Center => "center",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = WatermarkError;

    /// Accepts `topleft`, `top-left` and `top_left` spellings (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "topleft" | "top-left" | "top_left" => Ok(Anchor::TopLeft),
            "topright" | "top-right" | "top_right" => Ok(Anchor::TopRight),
            "bottomleft" | "bottom-left" | "bottom_left" => Ok(Anchor::BottomLeft),
            "bottomright" | "bottom-right" | "bottom_right" => Ok(Anchor::BottomRight),
            "center" | "centre" => Ok(Anchor::Center),
            _ => Err(WatermarkError::InvalidAnchor(s.to_string())),
        }
    }
}

impl serde::Serialize for Anchor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Anchor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Uniform watermark opacity on the unit scale.
///
/// Values outside `[0.0, 1.0]` (and NaN/infinities) are rejected, never clamped.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Opacity(f32);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0.0);
    pub const OPAQUE: Opacity = Opacity(1.0);

    pub fn new(value: f32) -> WatermarkResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(WatermarkError::InvalidOpacity(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl TryFrom<f32> for Opacity {
    type Error = WatermarkError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Opacity> for f32 {
    fn from(value: Opacity) -> Self {
        value.0
    }
}

/// Top-left corner of the placed watermark in target pixel space. May be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

/// One compositing job: consumed by [`CompositeRequest::composite`].
///
/// The watermark is borrowed since a single rasterized watermark is stamped onto every target.
#[derive(Debug)]
pub struct CompositeRequest<'a> {
    pub target: PixelBuffer,
    pub watermark: &'a PixelBuffer,
    pub anchor: Anchor,
    pub opacity: Opacity,
}

impl CompositeRequest<'_> {
    /// Run placement and blending; the target buffer is dropped afterwards.
    pub fn composite(self) -> PixelBuffer {
        crate::render::composite::place_and_blend(
            &self.target,
            self.watermark,
            self.anchor,
            self.opacity,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
