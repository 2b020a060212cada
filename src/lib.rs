//! Watermarker stamps a vector watermark onto a batch of raster images.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: watermark SVG -> [`PixelBuffer`] at its intrinsic size
//! 2. **Validate**: target paths -> [`ValidationOutcome`] (accepted / rejected)
//! 3. **Backup**: each accepted target is copied to `<name>.bak`
//! 4. **Composite**: target + watermark + [`Anchor`] + [`Opacity`] -> new [`PixelBuffer`]
//! 5. **Commit**: the result is written as PNG; a JPEG original is removed afterwards
//!
//! The library never exits the process; callers map [`WatermarkError`] to exit codes.
#![forbid(unsafe_code)]

mod assets;
mod backup;
mod config;
mod encode;
mod foundation;
mod pipeline;
mod render;
mod validate;

pub use assets::decode::{decode_image, load_target, load_watermark, parse_svg};
pub use assets::svg_raster::{MAX_DIM, rasterize_svg, rasterize_tree, svg_raster_size};
pub use backup::{backup_all, backup_path};
pub use config::{SettingsFile, WatermarkSettings};
pub use encode::png::{OutputPlan, WrittenOutput, commit_png, encode_png};
pub use foundation::core::{Anchor, CompositeRequest, Offset, Opacity, PixelBuffer, Rgba8};
pub use foundation::error::{ErrorKind, WatermarkError, WatermarkResult};
pub use pipeline::{BatchOptions, BatchReport, process_target, run_batch};
pub use render::composite::{over, place_and_blend, placement_offset};
pub use validate::{
    ACCEPTED_EXTENSIONS, Rejection, ValidationOutcome, validate_target, validate_targets,
};
