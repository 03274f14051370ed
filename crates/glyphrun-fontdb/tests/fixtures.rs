//! Outline provider against the GlyphrunBoxes fixture fonts
//!
//! Both files hold the same four glyphs; `test-fonts/make_boxes.py` lists them.

use std::path::PathBuf;

use glyphrun_core::{
    error::{GlyphrunError, RenderError},
    types::GlyphExtents,
    BoundingBox, FontOutlines,
};
use glyphrun_fontdb::{Font, FontDatabase};
use kurbo::Shape;

fn test_font(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // root
    path.push("test-fonts");
    path.push(name);
    path
}

fn check_boxes_font(font: &Font) {
    assert_eq!(font.units_per_em(), 1000);
    assert_eq!(font.glyph_count(), 4);
    assert_eq!(font.family_name(), Some("Glyphrun Boxes"));

    assert_eq!(
        font.glyph_extents(0),
        Some(GlyphExtents::new(50.0, 0.0, 450.0, 700.0))
    );
    assert_eq!(
        font.glyph_extents(2),
        Some(GlyphExtents::new(100.0, 0.0, 500.0, 500.0))
    );
    assert_eq!(
        font.glyph_extents(3),
        Some(GlyphExtents::new(200.0, -200.0, 300.0, 800.0))
    );
    // Space carries no ink
    assert!(font
        .glyph_extents(1)
        .map_or(true, |e| e.width() == 0.0 && e.height() == 0.0));
    assert_eq!(font.glyph_extents(4), None);
}

fn check_outlines(font: &Font) {
    let tall = font.glyph_outline(3).unwrap();
    assert!(!tall.elements().is_empty());
    let rect = tall.bounding_box();
    assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (200.0, -200.0, 300.0, 800.0));

    assert!(font.glyph_outline(1).unwrap().elements().is_empty());

    assert!(matches!(
        font.glyph_outline(4),
        Err(GlyphrunError::Render(RenderError::UnknownGlyph(4)))
    ));
}

#[test]
fn truetype_fixture_reports_metrics_and_outlines() {
    let font = Font::from_file(test_font("GlyphrunBoxes.ttf")).unwrap();
    check_boxes_font(&font);
    check_outlines(&font);
}

#[test]
fn cff_fixture_measures_extents_from_outlines() {
    let font = Font::from_file(test_font("GlyphrunBoxes.otf")).unwrap();
    check_boxes_font(&font);
    check_outlines(&font);
}

#[test]
fn aggregate_box_matches_across_outline_formats() {
    // Space counts as a zero box at the origin, which pulls min_x to 0
    let expected = BoundingBox::new(-100.0, -300.0, 600.0, 900.0);
    for name in ["GlyphrunBoxes.ttf", "GlyphrunBoxes.otf"] {
        let font = Font::from_file(test_font(name)).unwrap();
        assert_eq!(BoundingBox::aggregate(&font), expected, "{}", name);
    }
}

#[test]
fn database_hands_out_the_same_font_twice() {
    let db = FontDatabase::new();
    let path = test_font("GlyphrunBoxes.ttf");
    let first = db.load_font(&path).unwrap();
    let second = db.load_font(&path).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(db.font_count(), 1);
    assert!(first.identity().ends_with("GlyphrunBoxes.ttf#0"));
}
