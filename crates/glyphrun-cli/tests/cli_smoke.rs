//! CLI smoke tests: argument handling and failure exit codes

use std::path::PathBuf;
use std::process::Command;

fn glyphrun() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_glyphrun"));
    command.env_remove("GLYPHRUN_SHAPER").env_remove("RUST_LOG");
    command
}

fn boxes_font() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // root
    path.join("test-fonts").join("GlyphrunBoxes.ttf")
}

#[test]
fn help_lists_subcommands() {
    let output = glyphrun().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["render", "info", "glyphs", "repl"] {
        assert!(stdout.contains(name), "help should mention {}", name);
    }
}

#[test]
fn render_help_documents_engine_options() {
    let output = glyphrun().args(["render", "--help"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--shaper"));
    assert!(stdout.contains("--timeout-ms"));
    assert!(stdout.contains("--debug-overlay"));
}

#[test]
fn info_on_missing_font_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ttf");
    let output = glyphrun()
        .args(["info", "-f"])
        .arg(&missing)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn render_with_missing_font_reports_failure_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("run.svg");
    let output = glyphrun()
        .args(["render", "سلام", "-f"])
        .arg(dir.path().join("missing.ttf"))
        .arg("--svg")
        .arg(&svg)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing failed:"), "stderr: {}", stderr);
    assert!(!svg.exists());
}

#[test]
fn invalid_direction_is_a_usage_error() {
    let output = glyphrun()
        .args(["render", "abc", "-f", "font.ttf", "-d", "sideways"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ltr or rtl"));
}

#[test]
fn info_reports_the_fixture_font() {
    let output = glyphrun().args(["info", "-f"]).arg(boxes_font()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Family:        Glyphrun Boxes"));
    assert!(stdout.contains("Units per em:  1000"));
    assert!(stdout.contains("Glyphs:        4"));
    assert!(stdout.contains("Bounding box:  -100.00 -300.00 600.00 900.00"));
}

#[test]
fn glyphs_writes_one_svg_per_glyph() {
    let dir = tempfile::tempdir().unwrap();
    let output = glyphrun()
        .args(["glyphs", "-f"])
        .arg(boxes_font())
        .arg("--out-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Glyphs 0..4 of 4\n"));
    assert!(stdout.contains("[3]  200.00 -200.00 300.00 800.00"));

    let tall = std::fs::read_to_string(dir.path().join("glyph-00003.svg")).unwrap();
    assert!(tall.contains(r#"viewBox="150.00 -300.00 200.00 1200.00""#));
    assert!(dir.path().join("glyph-00000.svg").exists());
    assert!(!dir.path().join("glyph-00004.svg").exists());
}

#[test]
fn glyphs_past_the_last_id_fail() {
    let output = glyphrun()
        .args(["glyphs", "-r", "10..20", "-f"])
        .arg(boxes_font())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("4 glyphs"));
}
