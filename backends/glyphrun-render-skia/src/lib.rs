//! Skia Renderer: glyph runs painted onto a fixed-size canvas via tiny-skia
//!
//! The canvas never grows to fit the text. Instead the layout is hung from an
//! anchor inset by the margin from the bottom edge: the bottom-right corner
//! for right-to-left runs (which end at the origin) and the bottom-left corner
//! for left-to-right runs (which start there).
//!
//! ## Axis convention
//!
//! Layout positions are font-up. Each glyph is placed at
//! `anchor + (pen.x, -pen.y)` and painted with its own `scale(s, -s)`
//! transform, so the y axis is negated per draw call and never globally.
//! Everything that lands on the canvas therefore reads device-down.

use kurbo::{BezPath, PathEl, Point, Vec2};
use tiny_skia::{
    FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use glyphrun_core::{
    em_scale,
    error::{RenderError, Result},
    traits::{FontOutlines, Renderer},
    types::{BitmapData, Direction, GlyphExtents, RenderOutput},
    BoundingBox, Color, PlacedGlyph, RunLayout,
};

/// Canvas and paint settings
#[derive(Debug, Clone, PartialEq)]
pub struct RasterParams {
    pub width: u32,
    pub height: u32,
    /// Inset of the anchor from the canvas edges, in pixels
    pub margin: f32,
    /// Em size in pixels
    pub point_size: f64,
    pub foreground: Color,
    pub background: Option<Color>,
    /// Ink boxes, offset connectors and advance crosshairs under each glyph
    pub debug_overlay: bool,
    /// Axis lines through the anchor
    pub guides: bool,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 200,
            margin: 100.0,
            point_size: 48.0,
            foreground: Color::cyan(),
            background: None,
            debug_overlay: false,
            guides: true,
        }
    }
}

/// tiny-skia powered raster backend
pub struct SkiaRenderer {
    params: RasterParams,
    /// Maximum canvas dimension to prevent memory exhaustion
    max_size: u32,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::with_params(RasterParams::default())
    }

    pub fn with_params(params: RasterParams) -> Self {
        Self {
            params,
            max_size: 16384,
        }
    }

    pub fn params(&self) -> &RasterParams {
        &self.params
    }

    /// Where the pen's origin lands on the canvas
    pub fn anchor(&self, direction: Direction) -> Point {
        let p = &self.params;
        let y = f64::from(p.height) - f64::from(p.margin);
        match direction {
            Direction::RightToLeft => Point::new(f64::from(p.width) - f64::from(p.margin), y),
            Direction::LeftToRight => Point::new(f64::from(p.margin), y),
        }
    }

    fn draw_guides(&self, pixmap: &mut Pixmap, anchor: Point) {
        let w = f64::from(self.params.width);
        let h = f64::from(self.params.height);
        let paint = paint_for(Color::red());
        stroke_line(pixmap, Point::new(0.0, anchor.y), Point::new(w, anchor.y), &paint, 1.0);
        stroke_line(pixmap, Point::new(anchor.x, 0.0), Point::new(anchor.x, h), &paint, 1.0);
    }

    /// Debug marks for one glyph, in device space around its pen
    fn draw_overlay(
        &self,
        pixmap: &mut Pixmap,
        placed: &PlacedGlyph,
        pen: Point,
        offset: Vec2,
        extents: Option<GlyphExtents>,
        scale: f64,
    ) {
        let paint = paint_for(self.params.foreground.with_alpha(64));
        let w = f64::from(self.params.width);
        let h = f64::from(self.params.height);

        if let Some(dot) = PathBuilder::from_circle(pen.x as f32, pen.y as f32, 3.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            stroke_path(pixmap, &dot, &paint, 1.0);
        }

        if let Some(ext) = extents {
            // Top-left of the ink box once flipped to device-down
            let bearing = Vec2::new(ext.x_min * scale, -ext.y_max * scale);
            let size = Vec2::new(ext.width() * scale, ext.height() * scale);
            let unshifted = pen + bearing;

            if let Some(rect) = rect_path(unshifted, size) {
                stroke_path(pixmap, &rect, &paint, 1.0);
            }
            if let Some(rect) = rect_path(unshifted + offset, size) {
                stroke_path(pixmap, &rect, &paint, 2.0);
            }
            stroke_line(pixmap, unshifted, unshifted + offset, &paint, 1.0);
        }

        let info = &placed.info;
        if info.x_advance != 0 {
            let x = pen.x + f64::from(info.x_advance) * scale;
            stroke_line(pixmap, Point::new(x, 0.0), Point::new(x, h), &paint, 1.0);
        }
        if info.y_advance != 0 {
            let y = pen.y - f64::from(info.y_advance) * scale;
            stroke_line(pixmap, Point::new(0.0, y), Point::new(w, y), &paint, 1.0);
        }
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SkiaRenderer {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn layout_scale(&self, units_per_em: u16) -> f64 {
        em_scale(self.params.point_size, units_per_em)
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

        let (width, height) = (self.params.width, self.params.height);
        if width == 0 || height == 0 || width > self.max_size || height > self.max_size {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }

        log::debug!(
            "SkiaRenderer: {} glyphs onto {}x{} (scale {:.4}, bbox {})",
            layout.len(),
            width,
            height,
            layout.scale,
            bbox
        );

        // Resolve every outline up front so a bad glyph never leaves a half-painted canvas
        let mut paths = Vec::with_capacity(layout.len());
        for placed in &layout.glyphs {
            let glyph_id = placed.info.id;
            if !font.contains_glyph(glyph_id) {
                return Err(RenderError::UnknownGlyph(glyph_id).into());
            }
            let outline = font.glyph_outline(glyph_id)?;
            let path = to_skia_path(&outline);
            if path.is_none() {
                log::debug!("SkiaRenderer: glyph {} has nothing to fill", glyph_id);
            }
            paths.push(path);
        }

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })?;
        if let Some(bg) = self.params.background {
            pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        }

        let anchor = self.anchor(layout.direction);
        if self.params.guides {
            self.draw_guides(&mut pixmap, anchor);
        }

        let scale = layout.scale;
        let paint = paint_for(self.params.foreground);

        for (placed, path) in layout.glyphs.iter().zip(&paths) {
            let pen = anchor + Vec2::new(placed.pen.x, -placed.pen.y);
            let offset = placed.offset();
            let offset = Vec2::new(offset.x, -offset.y);

            if self.params.debug_overlay {
                let extents = font.glyph_extents(placed.info.id);
                self.draw_overlay(&mut pixmap, placed, pen, offset, extents, scale);
            }

            let Some(path) = path else {
                continue;
            };
            let origin = pen + offset;
            let transform = Transform::from_row(
                scale as f32,
                0.0,
                0.0,
                -scale as f32,
                origin.x as f32,
                origin.y as f32,
            );
            pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
        }

        Ok(RenderOutput::Bitmap(BitmapData {
            width,
            height,
            data: straight_rgba(&pixmap),
        }))
    }
}

/// kurbo path to tiny-skia, `None` when nothing would be drawn
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn rect_path(top_left: Point, size: Vec2) -> Option<Path> {
    Rect::from_xywh(
        top_left.x as f32,
        top_left.y as f32,
        size.x as f32,
        size.y as f32,
    )
    .map(PathBuilder::from_rect)
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, paint: &Paint<'_>, width: f32) {
    let stroke = Stroke {
        width,
        ..Default::default()
    };
    pixmap.stroke_path(path, paint, &stroke, Transform::identity(), None);
}

fn stroke_line(pixmap: &mut Pixmap, from: Point, to: Point, paint: &Paint<'_>, width: f32) {
    let mut builder = PathBuilder::new();
    builder.move_to(from.x as f32, from.y as f32);
    builder.line_to(to.x as f32, to.y as f32);
    if let Some(line) = builder.finish() {
        stroke_path(pixmap, &line, paint, width);
    }
}

/// tiny-skia stores premultiplied pixels; callers get straight alpha
fn straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    data
}
