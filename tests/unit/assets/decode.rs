use std::{io::Cursor, path::PathBuf};

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_decode").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba.clone()).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw(), src_rgba.as_slice());
}

#[test]
fn decode_image_without_alpha_is_opaque() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert!(decoded.as_raw().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

/// JPEG of a `w`x`h` image, left half red and right half blue, tagged with EXIF `orientation`.
fn jpeg_with_orientation(w: u32, h: u32, orientation: u16) -> Vec<u8> {
    let img = image::RgbImage::from_fn(w, h, |x, _| {
        if x < w / 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();

    // APP1 "Exif" segment: little-endian TIFF header with a single IFD0 entry (0x0112).
    let mut exif = Vec::new();
    exif.extend_from_slice(b"Exif\0\0");
    exif.extend_from_slice(b"II*\0");
    exif.extend_from_slice(&8u32.to_le_bytes());
    exif.extend_from_slice(&1u16.to_le_bytes());
    exif.extend_from_slice(&0x0112u16.to_le_bytes());
    exif.extend_from_slice(&3u16.to_le_bytes());
    exif.extend_from_slice(&1u32.to_le_bytes());
    exif.extend_from_slice(&orientation.to_le_bytes());
    exif.extend_from_slice(&[0, 0]);
    exif.extend_from_slice(&0u32.to_le_bytes());

    let mut out = Vec::with_capacity(jpeg.len() + exif.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&exif);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn is_reddish(px: [u8; 4]) -> bool {
    px[0] > 200 && px[2] < 60
}

fn is_bluish(px: [u8; 4]) -> bool {
    px[2] > 200 && px[0] < 60
}

#[test]
fn decode_image_applies_exif_rotation() {
    let bytes = jpeg_with_orientation(20, 10, 6);
    let decoded = decode_image(&bytes).unwrap();

    // Orientation 6: displayed rotated 90 degrees clockwise, so the left (red) half ends up on top.
    assert_eq!(decoded.dimensions(), (10, 20));
    assert!(is_reddish(decoded.pixel(5, 2).unwrap()));
    assert!(is_bluish(decoded.pixel(5, 17).unwrap()));
}

#[test]
fn decode_image_without_rotation_keeps_layout() {
    let bytes = jpeg_with_orientation(20, 10, 1);
    let decoded = decode_image(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (20, 10));
    assert!(is_reddish(decoded.pixel(2, 5).unwrap()));
    assert!(is_bluish(decoded.pixel(17, 5).unwrap()));
}

#[test]
fn load_target_rotated_jpeg_from_disk() {
    let dir = scratch_dir("rotated_jpeg");
    let path = dir.join("camera.jpg");
    std::fs::write(&path, jpeg_with_orientation(20, 10, 6)).unwrap();
    assert_eq!(load_target(&path).unwrap().dimensions(), (10, 20));
}

#[test]
fn decode_image_garbage_is_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, WatermarkError::Decode(_)));
}

#[test]
fn load_target_missing_file() {
    let dir = scratch_dir("missing_target");
    let err = load_target(&dir.join("nope.png")).unwrap_err();
    assert!(matches!(err, WatermarkError::MissingFile(_)));
}

#[test]
fn parse_svg_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(matches!(
        parse_svg(bad),
        Err(WatermarkError::InvalidSource(_))
    ));
}

#[test]
fn load_watermark_checks_extension_before_existence() {
    let dir = scratch_dir("wm_extension");
    let err = load_watermark(&dir.join("logo.png")).unwrap_err();
    assert!(matches!(err, WatermarkError::InvalidSource(_)));

    let err = load_watermark(&dir.join("logo.svg")).unwrap_err();
    assert!(matches!(err, WatermarkError::MissingFile(_)));
}

#[test]
fn load_watermark_malformed_markup_is_invalid_source() {
    let dir = scratch_dir("wm_malformed");
    let path = dir.join("broken.SVG");
    std::fs::write(&path, "<svg xmlns=\"http://www.w3.org/2000/svg\"").unwrap();
    let err = load_watermark(&path).unwrap_err();
    assert!(matches!(err, WatermarkError::InvalidSource(_)));
}

#[test]
fn load_watermark_rasterizes_native_size() {
    let dir = scratch_dir("wm_ok");
    let path = dir.join("logo.svg");
    std::fs::write(
        &path,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="12" height="7"><rect width="12" height="7" fill="#00ff00"/></svg>"##,
    )
    .unwrap();

    let wm = load_watermark(&path).unwrap();
    assert_eq!(wm.dimensions(), (12, 7));
    assert_eq!(wm.pixel(5, 3), Some([0, 255, 0, 255]));
}
