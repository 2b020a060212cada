use std::path::PathBuf;

use super::*;

#[test]
fn defaults_are_bottom_right_and_opaque() {
    let s = WatermarkSettings::default();
    assert_eq!(s.anchor, Anchor::BottomRight);
    assert_eq!(s.opacity, Opacity::OPAQUE);
}

#[test]
fn json_fields_are_optional() {
    let s = WatermarkSettings::from_json_str("{}").unwrap();
    assert_eq!(s, WatermarkSettings::default());

    let s = WatermarkSettings::from_json_str(r#"{"anchor": "center", "opacity": 0.5}"#).unwrap();
    assert_eq!(s.anchor, Anchor::Center);
    assert_eq!(s.opacity.get(), 0.5);

    let s = WatermarkSettings::from_json_str(r#"{"opacity": 0.0}"#).unwrap();
    assert_eq!(s.anchor, Anchor::BottomRight);
    assert_eq!(s.opacity, Opacity::TRANSPARENT);
}

#[test]
fn json_rejects_bad_values_and_unknown_fields() {
    for doc in [
        r#"{"anchor": "upperleft"}"#,
        r#"{"opacity": 100.0}"#,
        r#"{"alpha": 0.5}"#,
        "not json",
    ] {
        let err = WatermarkSettings::from_json_str(doc).unwrap_err();
        assert!(matches!(err, WatermarkError::Config(_)), "{doc}: {err}");
    }
}

#[test]
fn merged_prefers_overrides() {
    let base = WatermarkSettings {
        anchor: Anchor::TopLeft,
        opacity: Opacity::new(0.3).unwrap(),
    };
    let out = base.merged(SettingsFile {
        anchor: None,
        opacity: Some(Opacity::OPAQUE),
    });
    assert_eq!(out.anchor, Anchor::TopLeft);
    assert_eq!(out.opacity, Opacity::OPAQUE);
}

#[test]
fn from_json_file_reads_and_reports_path() {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(&path, r#"{"anchor": "top-right"}"#).unwrap();

    let s = WatermarkSettings::from_json_file(&path).unwrap();
    assert_eq!(s.anchor, Anchor::TopRight);

    let missing = dir.join("absent.json");
    let err = WatermarkSettings::from_json_file(&missing).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
