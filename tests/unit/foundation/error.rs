use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WatermarkError::invalid_source("x")
            .to_string()
            .contains("invalid watermark source:")
    );
    assert!(
        WatermarkError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        WatermarkError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        WatermarkError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn path_variants_mention_the_path() {
    let err = WatermarkError::missing_file("photos/a.jpg");
    assert!(err.to_string().contains("photos/a.jpg"));

    let err = WatermarkError::backup("photos/b.png", "permission denied");
    let msg = err.to_string();
    assert!(msg.contains("photos/b.png"));
    assert!(msg.contains("permission denied"));
}

#[test]
fn kind_matches_variant() {
    assert_eq!(
        WatermarkError::InvalidAnchor("upperleft".into()).kind(),
        ErrorKind::InvalidAnchor
    );
    assert_eq!(
        WatermarkError::InvalidOpacity(2.0).kind(),
        ErrorKind::InvalidOpacity
    );
    assert_eq!(
        WatermarkError::UnsupportedExtension {
            path: "a.gif".into(),
            ext: "gif".into(),
        }
        .kind(),
        ErrorKind::UnsupportedExtension
    );
    assert_eq!(
        WatermarkError::backup("a", "b").kind(),
        ErrorKind::Backup
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WatermarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
