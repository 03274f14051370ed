//! Cursor layout: glyph runs become pen positions
//!
//! The shaping engine already emits glyphs in visual left-to-right order, so
//! both directions walk the sequence front to back with the same update rule.
//! Right-to-left runs only move the starting pen to `-breath`, which makes
//! the run end flush with the origin.
//!
//! Positions are font-up (y grows upward). Each renderer maps them onto its
//! own device axis.

use kurbo::{Point, Vec2};

use crate::types::{Direction, GlyphInfo};

/// Font-units-to-target factor for a point size
pub fn em_scale(point_size: f64, units_per_em: u16) -> f64 {
    point_size / f64::from(units_per_em.max(1))
}

/// A glyph plus where the pen stood and where its outline goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub info: GlyphInfo,
    /// Pen position before this glyph was drawn
    pub pen: Point,
    /// `pen` shifted by the scaled glyph offset
    pub origin: Point,
}

impl PlacedGlyph {
    /// Scaled (x_offset, y_offset)
    pub fn offset(&self) -> Vec2 {
        self.origin - self.pen
    }
}

/// A fully positioned run
#[derive(Debug, Clone, PartialEq)]
pub struct RunLayout {
    pub glyphs: Vec<PlacedGlyph>,
    pub direction: Direction,
    pub scale: f64,
    /// Where the pen started
    pub start: Point,
    /// Where the pen came to rest
    pub end: Point,
    /// Total scaled x advance of the run
    pub breath: f64,
}

impl RunLayout {
    pub fn compute(glyphs: &[GlyphInfo], direction: Direction, scale: f64) -> Self {
        let breath: f64 = glyphs
            .iter()
            .map(|g| f64::from(g.x_advance) * scale)
            .sum();

        let start = match direction {
            Direction::LeftToRight => Point::ORIGIN,
            Direction::RightToLeft => Point::new(-breath, 0.0),
        };

        let mut pen = start;
        let mut placed = Vec::with_capacity(glyphs.len());
        for info in glyphs {
            let offset = Vec2::new(f64::from(info.x_offset), f64::from(info.y_offset)) * scale;
            placed.push(PlacedGlyph {
                info: *info,
                pen,
                origin: pen + offset,
            });
            pen += Vec2::new(f64::from(info.x_advance), f64::from(info.y_advance)) * scale;
        }

        log::debug!(
            "Layout: {} glyphs, {} run, scale {:.4}, breath {:.2}",
            placed.len(),
            direction,
            scale,
            breath
        );

        Self {
            glyphs: placed,
            direction,
            scale,
            start,
            end: pen,
            breath,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }
}
