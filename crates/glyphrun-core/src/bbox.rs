//! Font-wide ink extents
//!
//! Every glyph in the font is measured once and unioned into a single box,
//! which then grows by [`INK_MARGIN`] so overshooting ink is never clipped by
//! a viewport sized from it. A font without glyphs keeps the empty sentinel,
//! and consumers must check [`BoundingBox::is_empty`] before using it.

use std::fmt;

use crate::{
    traits::FontOutlines,
    types::{GlyphExtents, GlyphId},
};

/// Margin added around the aggregated box, in font units
pub const INK_MARGIN: f64 = 100.0;

/// Axis-aligned box in font units, y-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// The sentinel that absorbs any rectangle on first union
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Nothing has been unioned in yet
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    /// Grow to cover the rectangle spanned by two corners
    ///
    /// Corners may come in either order; NaN coordinates are ignored.
    pub fn union(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> &mut Self {
        self.min_x = self.min_x.min(x0.min(x1));
        self.min_y = self.min_y.min(y0.min(y1));
        self.max_x = self.max_x.max(x0.max(x1));
        self.max_y = self.max_y.max(y0.max(y1));
        self
    }

    pub fn union_extents(&mut self, extents: &GlyphExtents) -> &mut Self {
        self.union(extents.x_min, extents.y_min, extents.x_max, extents.y_max)
    }

    /// Expand uniformly on every side; the empty box stays empty
    pub fn add_margin(&mut self, margin: f64) -> &mut Self {
        if self.is_empty() {
            return self;
        }
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
        self
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// As a kurbo rectangle, `None` for the sentinel
    pub fn to_rect(&self) -> Option<kurbo::Rect> {
        if self.is_empty() {
            None
        } else {
            Some(kurbo::Rect::new(self.min_x, self.min_y, self.max_x, self.max_y))
        }
    }

    /// Union of the given glyphs' ink extents, without margin
    ///
    /// Missing extents count as a zero-area box at the origin.
    pub fn of_glyphs(
        font: &dyn FontOutlines,
        glyph_ids: impl IntoIterator<Item = GlyphId>,
    ) -> Self {
        let mut bbox = Self::EMPTY;
        for glyph_id in glyph_ids {
            let extents = font.glyph_extents(glyph_id).unwrap_or_default();
            bbox.union_extents(&extents);
        }
        bbox
    }

    /// Maximal ink extent of the whole font, expanded by [`INK_MARGIN`]
    pub fn aggregate(font: &dyn FontOutlines) -> Self {
        let mut bbox = Self::of_glyphs(font, font.glyph_order());
        bbox.add_margin(INK_MARGIN);
        log::debug!("BoundingBox: {} -> {}", font.identity(), bbox);
        bbox
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        write!(
            f,
            "{:.2} {:.2} {:.2} {:.2}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, Result};
    use kurbo::BezPath;
    use std::collections::HashMap;

    struct ExtentsOnly {
        extents: HashMap<GlyphId, GlyphExtents>,
        count: u32,
    }

    impl FontOutlines for ExtentsOnly {
        fn identity(&self) -> &str {
            "extents-only"
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_count(&self) -> u32 {
            self.count
        }

        fn glyph_extents(&self, glyph_id: GlyphId) -> Option<GlyphExtents> {
            self.extents.get(&glyph_id).copied()
        }

        fn glyph_outline(&self, glyph_id: GlyphId) -> Result<BezPath> {
            Err(RenderError::UnknownGlyph(glyph_id).into())
        }
    }

    #[test]
    fn empty_sentinel_reports_empty() {
        let bbox = BoundingBox::EMPTY;
        assert!(bbox.is_empty());
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.to_rect(), None);
        assert_eq!(bbox.to_string(), "empty");
    }

    #[test]
    fn margin_leaves_sentinel_alone() {
        let mut bbox = BoundingBox::EMPTY;
        bbox.add_margin(INK_MARGIN);
        assert_eq!(bbox, BoundingBox::EMPTY);
    }

    #[test]
    fn union_normalizes_swapped_corners() {
        let mut bbox = BoundingBox::EMPTY;
        bbox.union(100.0, 50.0, -20.0, -10.0);
        assert_eq!(bbox, BoundingBox::new(-20.0, -10.0, 100.0, 50.0));
        assert!(!bbox.is_empty());
    }

    #[test]
    fn union_ignores_nan() {
        let mut bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        bbox.union(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn single_glyph_font_gets_margin() {
        let font = ExtentsOnly {
            extents: HashMap::from([(0, GlyphExtents::new(0.0, 0.0, 100.0, 100.0))]),
            count: 1,
        };
        let bbox = BoundingBox::aggregate(&font);
        assert_eq!(bbox, BoundingBox::new(-100.0, -100.0, 200.0, 200.0));
        assert_eq!(bbox.to_string(), "-100.00 -100.00 200.00 200.00");
    }

    #[test]
    fn missing_extents_count_as_origin() {
        let font = ExtentsOnly {
            extents: HashMap::from([(1, GlyphExtents::new(10.0, 20.0, 30.0, 40.0))]),
            count: 2,
        };
        let bbox = BoundingBox::of_glyphs(&font, font.glyph_order());
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 30.0, 40.0));
    }

    #[test]
    fn zero_glyph_font_stays_empty() {
        let font = ExtentsOnly {
            extents: HashMap::new(),
            count: 0,
        };
        assert!(BoundingBox::aggregate(&font).is_empty());
    }
}
