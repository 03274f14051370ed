//! Glyphs command: a font's glyphs by id, each with its ink box

use std::fmt::Write as _;
use std::ops::Range;
use std::path::Path;

use glyphrun::error::{GlyphrunError, Result};
use glyphrun::export::{exporter_for, write_output};
use glyphrun::fontdb::Font;
use glyphrun::render_svg::SvgRenderer;
use glyphrun::traits::FontOutlines;
use glyphrun::types::{GlyphId, RenderOutput};
use glyphrun::BoundingBox;

use crate::cli::GlyphsArgs;

pub fn run(args: &GlyphsArgs) -> Result<()> {
    let font = Font::from_file(&args.font)?;
    print!("{}", browse(&font, args.range.clone(), args.out_dir.as_deref())?);
    Ok(())
}

/// One line per glyph; with `out_dir`, also one SVG file per glyph
fn browse(font: &dyn FontOutlines, range: Range<u32>, out_dir: Option<&Path>) -> Result<String> {
    let count = font.glyph_count();
    if range.start >= count {
        return Err(GlyphrunError::ConfigError(format!(
            "glyph range {}..{} starts past the last glyph ({} glyphs)",
            range.start, range.end, count
        )));
    }
    let ids = range.start..range.end.min(count);

    let font_box = BoundingBox::aggregate(font);
    let renderer = SvgRenderer::new();
    let exporter = exporter_for("svg")?;

    let mut out = String::new();
    let _ = writeln!(out, "Glyphs {}..{} of {}", ids.start, ids.end, count);
    for glyph_id in ids {
        let ink = match font.glyph_extents(glyph_id) {
            Some(e) => format!("{:.2} {:.2} {:.2} {:.2}", e.x_min, e.y_min, e.x_max, e.y_max),
            None => "(no ink)".to_string(),
        };
        let _ = write!(out, "[{}]  {}", glyph_id, ink);

        if let Some(dir) = out_dir {
            let document = renderer.render_glyph(font, glyph_id, &font_box)?;
            let path = dir.join(file_name(glyph_id));
            let bytes = exporter.export(&RenderOutput::Vector(document))?;
            write_output(&path, &bytes)?;
            let _ = write!(out, "  -> {}", path.display());
        }
        out.push('\n');
    }
    Ok(out)
}

fn file_name(glyph_id: GlyphId) -> String {
    format!("glyph-{:05}.svg", glyph_id)
}
