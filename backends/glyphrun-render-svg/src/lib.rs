//! SVG Renderer: where glyphs become scalable vector paths
//!
//! Outlines come straight from the font in design units and are emitted
//! without any scaling. The document keeps the font's y-up convention
//! everywhere: one root group carries the axis flip, and no path, marker or
//! guide is ever flipped on its own.
//!
//! ## Document geometry
//!
//! - viewBox: `(bbox.min_x, bbox.min_y, breath, bbox.height)`
//! - root flip: `matrix(1 0 0 -1 0 min_y+max_y)` so the box's vertical span
//!   lands exactly on the viewBox
//!
//! The viewport is anchored at the box origin for both directions; a
//! right-to-left run is still drawn left of the pen origin. A font with no
//! glyphs yields the empty box; the document then has no viewBox and no guides.
//!
//! Single glyphs get their own inspection document, see
//! [`SvgRenderer::render_glyph`].

use std::fmt::{self, Write as FmtWrite};

use kurbo::{BezPath, PathEl, Point};

mod glyph;

pub use glyph::GLYPH_PADDING;

use glyphrun_core::{
    error::{RenderError, Result},
    traits::{FontOutlines, Renderer},
    types::{RenderOutput, VectorData},
    BoundingBox, Color, RunLayout,
};

/// Half the length of each crosshair arm, in font units
pub const DEFAULT_CROSSHAIR: f64 = 50.0;

/// Vector renderer working in font units
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    fill: Color,
    /// Colour of crosshairs and guides
    marker: Color,
    /// Stroke of the ink box in glyph documents
    ink: Color,
    crosshair: f64,
    crosshair_width: f64,
    guide_width: f64,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            fill: Color::blue(),
            marker: Color::red(),
            ink: Color::green(),
            crosshair: DEFAULT_CROSSHAIR,
            crosshair_width: 10.0,
            guide_width: 5.0,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_marker_color(mut self, marker: Color) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_ink_color(mut self, ink: Color) -> Self {
        self.ink = ink;
        self
    }

    /// Set the crosshair arm length; zero hides the crosshairs
    pub fn with_crosshair(mut self, half_length: f64) -> Self {
        self.crosshair = half_length.max(0.0);
        self
    }

    pub fn with_stroke_widths(mut self, crosshair: f64, guide: f64) -> Self {
        self.crosshair_width = crosshair;
        self.guide_width = guide;
        self
    }

    pub fn crosshair(&self) -> f64 {
        self.crosshair
    }

    fn write_document(
        &self,
        out: &mut String,
        layout: &RunLayout,
        bbox: &BoundingBox,
        outlines: &[(Point, BezPath)],
    ) -> fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;

        let flip_y = match bbox.to_rect() {
            Some(rect) => {
                writeln!(
                    out,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
                    Num(rect.x0),
                    Num(rect.y0),
                    Num(layout.breath),
                    Num(rect.height())
                )?;
                rect.y0 + rect.y1
            },
            None => {
                writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg">"#)?;
                0.0
            },
        };

        writeln!(out, r#"  <g transform="matrix(1 0 0 -1 0 {})">"#, Num(flip_y))?;

        if let Some(rect) = bbox.to_rect() {
            // Baseline across the viewport, then the origin's vertical through the box
            self.write_line(
                out,
                Point::new(rect.x0, 0.0),
                Point::new(rect.x0 + layout.breath, 0.0),
                self.guide_width,
            )?;
            self.write_line(
                out,
                Point::new(0.0, rect.y0),
                Point::new(0.0, rect.y1),
                self.guide_width,
            )?;
        }

        for (origin, path) in outlines {
            if !path.elements().is_empty() {
                writeln!(
                    out,
                    concat!(
                        r#"    <path d="{}" fill="{}" fill-opacity="{:.2}" "#,
                        r#"transform="translate({},{})"/>"#
                    ),
                    path_data(path),
                    Rgb(self.fill),
                    f64::from(self.fill.a) / 255.0,
                    Num(origin.x),
                    Num(origin.y)
                )?;
            }

            if self.crosshair > 0.0 {
                let arm = self.crosshair;
                self.write_line(
                    out,
                    Point::new(origin.x - arm, origin.y),
                    Point::new(origin.x + arm, origin.y),
                    self.crosshair_width,
                )?;
                self.write_line(
                    out,
                    Point::new(origin.x, origin.y - arm),
                    Point::new(origin.x, origin.y + arm),
                    self.crosshair_width,
                )?;
            }
        }

        writeln!(out, "  </g>")?;
        writeln!(out, "</svg>")
    }

    fn write_line(&self, out: &mut String, from: Point, to: Point, width: f64) -> fmt::Result {
        writeln!(
            out,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            Num(from.x),
            Num(from.y),
            Num(to.x),
            Num(to.y),
            Rgb(self.marker),
            Num(width)
        )
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    fn name(&self) -> &'static str {
        "svg"
    }

    /// Paths are emitted in font units
    fn layout_scale(&self, _units_per_em: u16) -> f64 {
        1.0
    }

    fn render(
        &self,
        layout: &RunLayout,
        bbox: &BoundingBox,
        font: &dyn FontOutlines,
    ) -> Result<RenderOutput> {
        if layout.is_empty() {
            return Err(RenderError::EmptyRun.into());
        }

        log::debug!(
            "SvgRenderer: Rendering {} glyphs as vector paths (bbox {})",
            layout.len(),
            bbox
        );

        // Every outline is fetched before anything is written: no partial documents
        let mut outlines = Vec::with_capacity(layout.len());
        for placed in &layout.glyphs {
            let glyph_id = placed.info.id;
            if !font.contains_glyph(glyph_id) {
                return Err(RenderError::UnknownGlyph(glyph_id).into());
            }
            let path = font.glyph_outline(glyph_id)?;
            if path.elements().is_empty() {
                log::debug!("SvgRenderer: glyph {} has no outline", glyph_id);
            }
            outlines.push((placed.origin, path));
        }

        let mut svg = String::new();
        self.write_document(&mut svg, layout, bbox, &outlines)
            .map_err(|_| RenderError::PathBuildingFailed)?;

        Ok(RenderOutput::Vector(VectorData { data: svg }))
    }
}

/// Path data for the `d` attribute, coordinates untouched
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        // Writing into a String cannot fail
        let _ = match el {
            PathEl::MoveTo(p) => write!(d, "M{},{}", Num(p.x), Num(p.y)),
            PathEl::LineTo(p) => write!(d, "L{},{}", Num(p.x), Num(p.y)),
            PathEl::QuadTo(c, p) => {
                write!(d, "Q{},{} {},{}", Num(c.x), Num(c.y), Num(p.x), Num(p.y))
            },
            PathEl::CurveTo(c0, c1, p) => write!(
                d,
                "C{},{} {},{} {},{}",
                Num(c0.x),
                Num(c0.y),
                Num(c1.x),
                Num(c1.y),
                Num(p.x),
                Num(p.y)
            ),
            PathEl::ClosePath => {
                d.push('Z');
                Ok(())
            },
        };
    }
    d
}

/// Two-decimal number without a negative zero
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{:.2}", v)
    }
}

struct Rgb(Color);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0.r, self.0.g, self.0.b)
    }
}
