//! Session driven by the subprocess shaper, with `sh` playing the engine

#![cfg(unix)]

use std::path::Path;
use std::sync::Arc;

use glyphrun::error::{GlyphrunError, RenderError, Result, ShapingError};
use glyphrun::export::{exporter_for, write_output};
use glyphrun::prelude::{Exporter, FontLoader, FontOutlines, Outcome};
use glyphrun::shape_proc::ProcessShaper;
use glyphrun::types::{GlyphExtents, GlyphId};
use glyphrun::Session;
use kurbo::{BezPath, Shape};

/// A 400-unit disc for every glyph id below 10
struct Dots;

impl FontOutlines for Dots {
    fn identity(&self) -> &str {
        "dots"
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_count(&self) -> u32 {
        10
    }

    fn glyph_extents(&self, _glyph_id: GlyphId) -> Option<GlyphExtents> {
        Some(GlyphExtents::new(0.0, 0.0, 400.0, 400.0))
    }

    fn glyph_outline(&self, glyph_id: GlyphId) -> Result<BezPath> {
        if glyph_id >= 10 {
            return Err(RenderError::UnknownGlyph(glyph_id).into());
        }
        Ok(kurbo::Circle::new((200.0, 200.0), 200.0).to_path(0.1))
    }
}

struct AnyPath;

impl FontLoader for AnyPath {
    fn load(&self, _path: &Path) -> Result<Arc<dyn FontOutlines>> {
        Ok(Arc::new(Dots))
    }
}

fn session(script: &str) -> Session {
    let shaper = ProcessShaper::new("sh").with_args(["-c", script, "engine"]);
    let mut session = Session::builder()
        .shaper(Arc::new(shaper))
        .font_loader(Arc::new(AnyPath))
        .build();
    session.set_font("/fonts/Dots.ttf");
    session.set_text("سلام");
    session
}

#[test]
fn engine_failure_is_reported_with_its_stderr() {
    let mut session = session("echo 'font not found' >&2; exit 1");
    match session.refresh() {
        Outcome::Failed(err @ GlyphrunError::Shaping(ShapingError::ProcessFailed { .. })) => {
            assert_eq!(err.diagnostic(), Some("font not found"));
        },
        other => panic!("expected ProcessFailed, got {:?}", other),
    }
    assert!(session.current().message().contains("font not found"));
}

#[test]
fn malformed_listing_renders_nothing() {
    let mut session = session("printf 'hdr\\n1 0 0 500 0\\n'");
    assert!(matches!(
        session.refresh(),
        Outcome::Failed(GlyphrunError::Shaping(ShapingError::MalformedOutput { .. }))
    ));
}

#[test]
fn engine_output_flows_through_to_files() {
    let mut session = session(
        "printf 'Glyph information:\\n3 0 0 500 0 3\\n2 0 0 450 0 2\\n1 0 0 400 0 0\\n'",
    );
    let artifacts = session.refresh().artifacts().unwrap().clone();
    assert_eq!(artifacts.glyphs.len(), 3);
    assert_eq!(artifacts.vector_layout.breath, 1350.0);

    let dir = tempfile::tempdir().unwrap();
    for (format, output) in [("svg", &artifacts.vector), ("png", &artifacts.raster)] {
        let exporter = exporter_for(format).unwrap();
        let bytes = exporter.export(output).unwrap();
        let path = dir.path().join(format!("run.{}", exporter.extension()));
        write_output(&path, &bytes).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }
}
