use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_backup").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn backup_path_appends_suffix() {
    assert_eq!(
        backup_path(Path::new("pics/a.jpg")),
        PathBuf::from("pics/a.jpg.bak")
    );
    assert_eq!(backup_path(Path::new("b.PNG")), PathBuf::from("b.PNG.bak"));
}

#[test]
fn backup_all_copies_contents() {
    let dir = scratch_dir("copies");
    let a = dir.join("a.png");
    let b = dir.join("b.jpg");
    std::fs::write(&a, b"alpha").unwrap();
    std::fs::write(&b, b"bravo").unwrap();

    let written = backup_all(&[&a, &b]).unwrap();
    assert_eq!(written, vec![dir.join("a.png.bak"), dir.join("b.jpg.bak")]);
    assert_eq!(std::fs::read(dir.join("a.png.bak")).unwrap(), b"alpha");
    assert_eq!(std::fs::read(dir.join("b.jpg.bak")).unwrap(), b"bravo");
    assert!(a.exists() && b.exists());
}

#[test]
fn backup_all_overwrites_stale_backup() {
    let dir = scratch_dir("overwrite");
    let a = dir.join("a.png");
    std::fs::write(&a, b"new").unwrap();
    std::fs::write(dir.join("a.png.bak"), b"old").unwrap();

    backup_all(&[&a]).unwrap();
    assert_eq!(std::fs::read(dir.join("a.png.bak")).unwrap(), b"new");
}

#[test]
fn backup_failure_names_the_file() {
    let dir = scratch_dir("failure");
    let missing = dir.join("gone.png");
    let err = backup_all(&[&missing]).unwrap_err();
    match err {
        WatermarkError::Backup { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}
