//! Atomic output writing

use std::fs;

use glyphrun_core::{error::ExportError, GlyphrunError};
use glyphrun_export::write_output;

#[test]
fn writes_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.svg");
    write_output(&path, b"<svg/>").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
}

#[test]
fn replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.png");
    fs::write(&path, b"old contents that are longer").unwrap();
    write_output(&path, b"new").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn leaves_no_temporary_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    write_output(dir.path().join("a.svg"), b"a").unwrap();
    write_output(dir.path().join("b.svg"), b"b").unwrap();

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["a.svg", "b.svg"]);
}

#[test]
fn missing_directory_is_a_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.png");
    assert!(matches!(
        write_output(&path, b"x"),
        Err(GlyphrunError::Export(ExportError::WriteFailed(_)))
    ));
}

#[test]
fn failed_persist_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    // A directory sits where the file should go, so the final rename fails
    let blocker = dir.path().join("out.svg");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"k").unwrap();

    assert!(write_output(&blocker, b"data").is_err());

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
