use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_clean_missing_directory_is_not_an_error() {
    let fs = RecordingMaterializer::new();
    let removed = clean_build_root(Path::new("/work/build"), &fs).unwrap();

    assert!(!removed);
    assert!(fs.removed().is_empty());
}

#[test]
fn test_clean_removes_existing_root() {
    let fs = RecordingMaterializer::new().with_existing("/work/build");
    let removed = clean_build_root(Path::new("/work/build"), &fs).unwrap();

    assert!(removed);
    assert_eq!(fs.removed(), vec![PathBuf::from("/work/build")]);
    assert!(!fs.exists(Path::new("/work/build")));
}

#[test]
fn test_fs_materializer_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let build = temp_dir.path().join("build");
    let nested = build.join("app");

    FsMaterializer.create_dir_all(&nested).unwrap();
    assert!(FsMaterializer.exists(&nested));

    assert!(clean_build_root(&build, &FsMaterializer).unwrap());
    assert!(!build.exists());
}

#[test]
fn test_recording_materializer_failure() {
    let fs = RecordingMaterializer::failing_on("/denied");
    let err = fs.create_dir_all(Path::new("/denied")).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert!(fs.created().is_empty());
}
