//! One glyph on its own, for browsing a font
//!
//! The horizontal span hugs the glyph's ink box with [`GLYPH_PADDING`] on each
//! side; the vertical span and both guides come from the whole font's box, so
//! every glyph of a font sits on the same baseline at the same height.

use std::fmt::{self, Write as FmtWrite};

use kurbo::{BezPath, Point, Rect};

use glyphrun_core::{
    error::{RenderError, Result},
    traits::FontOutlines,
    types::{GlyphExtents, GlyphId, VectorData},
    BoundingBox,
};

use crate::{path_data, Num, Rgb, SvgRenderer};

/// Room left and right of the ink box, in font units
pub const GLYPH_PADDING: f64 = 50.0;

const INK_BOX_WIDTH: f64 = 10.0;

impl SvgRenderer {
    /// Inspection document for a single glyph
    ///
    /// `font_box` is the font's aggregate box, as from
    /// [`BoundingBox::aggregate`]. A glyph without extents is framed as an
    /// empty box at the origin.
    pub fn render_glyph(
        &self,
        font: &dyn FontOutlines,
        glyph_id: GlyphId,
        font_box: &BoundingBox,
    ) -> Result<VectorData> {
        if !font.contains_glyph(glyph_id) {
            return Err(RenderError::UnknownGlyph(glyph_id).into());
        }
        let outline = font.glyph_outline(glyph_id)?;
        let ink = font
            .glyph_extents(glyph_id)
            .unwrap_or(GlyphExtents::new(0.0, 0.0, 0.0, 0.0));
        let ink = Rect::new(ink.x_min, ink.y_min, ink.x_max, ink.y_max);
        let frame = font_box.to_rect().unwrap_or(ink);

        log::debug!("SvgRenderer: glyph {} with ink box {:?}", glyph_id, ink);

        let mut svg = String::new();
        self.write_glyph(&mut svg, &outline, ink, frame)
            .map_err(|_| RenderError::PathBuildingFailed)?;
        Ok(VectorData { data: svg })
    }

    fn write_glyph(
        &self,
        out: &mut String,
        outline: &BezPath,
        ink: Rect,
        frame: Rect,
    ) -> fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            Num(ink.x0 - GLYPH_PADDING),
            Num(frame.y0),
            Num(ink.width() + 2.0 * GLYPH_PADDING),
            Num(frame.height())
        )?;
        writeln!(out, r#"  <g transform="matrix(1 0 0 -1 0 {})">"#, Num(frame.y0 + frame.y1))?;

        writeln!(
            out,
            concat!(
                r#"    <rect x="{}" y="{}" width="{}" height="{}" "#,
                r#"fill="none" stroke="{}" stroke-width="{}"/>"#
            ),
            Num(ink.x0),
            Num(ink.y0),
            Num(ink.width()),
            Num(ink.height()),
            Rgb(self.ink),
            Num(INK_BOX_WIDTH)
        )?;

        self.write_line(
            out,
            Point::new(frame.x0, 0.0),
            Point::new(frame.x1, 0.0),
            self.guide_width,
        )?;
        self.write_line(
            out,
            Point::new(0.0, frame.y0),
            Point::new(0.0, frame.y1),
            self.guide_width,
        )?;

        if !outline.elements().is_empty() {
            writeln!(
                out,
                r#"    <path d="{}" fill="{}" fill-opacity="{:.2}"/>"#,
                path_data(outline),
                Rgb(self.fill),
                f64::from(self.fill.a) / 255.0
            )?;
        }

        writeln!(out, "  </g>")?;
        writeln!(out, "</svg>")
    }
}
