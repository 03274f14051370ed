//! The contracts that bind every backend together
//!
//! - [`Shaper`] - Where a request becomes a glyph run
//! - [`FontOutlines`] - Your window into glyph order, ink extents and outlines
//! - [`Renderer`] - Where laid-out glyphs become a document or a bitmap
//! - [`Exporter`] - Where render output becomes bytes on disk

use kurbo::BezPath;

use crate::{
    bbox::BoundingBox,
    error::Result,
    layout::RunLayout,
    types::{GlyphExtents, GlyphId, RenderOutput, ShapingRequest, ShapingResult},
};

/// Where characters learn their positions
///
/// Implementations must behave as a pure function of the request: the same
/// request always produces the same glyph run.
///
/// ```ignore
/// struct FixedShaper(Vec<GlyphInfo>);
///
/// impl Shaper for FixedShaper {
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
///
///     fn shape(&self, request: &ShapingRequest) -> Result<ShapingResult> {
///         Ok(ShapingResult::new(self.0.clone(), request.direction))
///     }
/// }
/// ```
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Turn the request into glyphs in visual (left-to-right) emission order
    fn shape(&self, request: &ShapingRequest) -> Result<ShapingResult>;
}

/// Glyph data in font design units
///
/// Coordinates are font-native: y grows upward.
pub trait FontOutlines: Send + Sync {
    /// Stable identity used to key per-font caches
    fn identity(&self) -> &str;

    /// The font's design grid size
    fn units_per_em(&self) -> u16;

    /// Number of glyphs in the font
    fn glyph_count(&self) -> u32;

    /// Glyph ids in the font's canonical order
    fn glyph_order(&self) -> Vec<GlyphId> {
        (0..self.glyph_count()).collect()
    }

    /// Whether the id appears in the glyph order
    fn contains_glyph(&self, glyph_id: GlyphId) -> bool {
        glyph_id < self.glyph_count()
    }

    /// Ink extents, `None` when the glyph draws nothing (space) or has no metrics
    fn glyph_extents(&self, glyph_id: GlyphId) -> Option<GlyphExtents>;

    /// Outline as path commands
    ///
    /// Unknown ids fail with
    /// [`RenderError::UnknownGlyph`](crate::error::RenderError::UnknownGlyph).
    fn glyph_outline(&self, glyph_id: GlyphId) -> Result<BezPath>;
}

/// Where glyphs become visible
pub trait Renderer: Send + Sync {
    /// Your renderer's signature
    fn name(&self) -> &'static str;

    /// Factor from font units to this renderer's target units
    fn layout_scale(&self, units_per_em: u16) -> f64;

    /// Draw a laid-out run
    ///
    /// `layout` must have been computed with [`Renderer::layout_scale`].
    fn render(
        &self,
        layout: &RunLayout,
        bbox: &BoundingBox,
        font: &dyn FontOutlines,
    ) -> Result<RenderOutput>;
}

/// The final step: output becomes bytes
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the rendered output as bytes
    fn export(&self, output: &RenderOutput) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
