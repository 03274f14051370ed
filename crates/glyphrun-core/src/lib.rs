//! Glyphrun Core: from shaped glyphs to positioned, renderable runs
//!
//! Text is shaped by an external engine, the resulting glyph run is laid out
//! with a moving pen, and two independent renderers turn the layout into an
//! SVG document and a raster image.
//!
//! ## The Pipeline
//!
//! 1. **Shaping** - A [`Shaper`] turns a [`types::ShapingRequest`] into glyphs
//! 2. **Extents** - [`BoundingBox::aggregate`] measures the whole font once
//! 3. **Layout** - [`RunLayout::compute`] walks the pen across the run
//! 4. **Rendering** - Each [`Renderer`] draws the layout in its own coordinates
//! 5. **Export** - An [`Exporter`] encodes the result
//!
//! ```rust
//! use glyphrun_core::{
//!     layout::RunLayout,
//!     types::{Direction, GlyphInfo},
//! };
//!
//! let glyphs = [GlyphInfo::new(5, 0, 0, 120, 0, 0)];
//! let layout = RunLayout::compute(&glyphs, Direction::RightToLeft, 1.0);
//!
//! assert_eq!(layout.start.x, -120.0);
//! assert_eq!(layout.end.x, 0.0);
//! ```

pub mod bbox;
pub mod cache;
pub mod error;
pub mod layout;
pub mod traits;

pub use bbox::{BoundingBox, INK_MARGIN};
pub use cache::BoundingBoxCache;
pub use error::{Result, GlyphrunError};
pub use layout::{em_scale, PlacedGlyph, RunLayout};
pub use traits::{Exporter, FontOutlines, Renderer, Shaper};

/// The data structures that flow between stages
pub mod types {
    use std::fmt;
    use std::path::PathBuf;
    use std::str::FromStr;

    use crate::error::GlyphrunError;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way the text flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Direction {
        #[default]
        LeftToRight,
        RightToLeft,
    }

    impl Direction {
        /// The token the shaping engine expects on its command line
        pub fn as_str(&self) -> &'static str {
            match self {
                Direction::LeftToRight => "ltr",
                Direction::RightToLeft => "rtl",
            }
        }
    }

    impl fmt::Display for Direction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Direction {
        type Err = GlyphrunError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "ltr" => Ok(Direction::LeftToRight),
                "rtl" => Ok(Direction::RightToLeft),
                other => Err(GlyphrunError::ConfigError(format!(
                    "Invalid direction: {} (expected ltr or rtl)",
                    other
                ))),
            }
        }
    }

    /// One glyph as reported by the shaping engine, in font design units
    ///
    /// `cluster` is passed through untouched; it is never checked against
    /// the input text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GlyphInfo {
        pub id: GlyphId,
        pub x_offset: i32,
        pub y_offset: i32,
        pub x_advance: i32,
        pub y_advance: i32,
        pub cluster: u32,
    }

    impl GlyphInfo {
        pub const fn new(
            id: GlyphId,
            x_offset: i32,
            y_offset: i32,
            x_advance: i32,
            y_advance: i32,
            cluster: u32,
        ) -> Self {
            Self {
                id,
                x_offset,
                y_offset,
                x_advance,
                y_advance,
                cluster,
            }
        }
    }

    impl fmt::Display for GlyphInfo {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{} ({},{}) +{}:{} [{}]",
                self.id, self.x_offset, self.y_offset, self.x_advance, self.y_advance, self.cluster
            )
        }
    }

    /// Everything the shaping engine needs for one run
    ///
    /// Built fresh whenever an input changes; never mutated afterwards.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ShapingRequest {
        pub font_file: PathBuf,
        pub text: String,
        pub direction: Direction,
        pub language: String,
    }

    impl ShapingRequest {
        pub fn new(
            font_file: impl Into<PathBuf>,
            text: impl Into<String>,
            direction: Direction,
            language: impl Into<String>,
        ) -> Self {
            Self {
                font_file: font_file.into(),
                text: text.into(),
                direction,
                language: language.into(),
            }
        }
    }

    /// What emerges after shaping: glyphs in visual emission order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ShapingResult {
        pub glyphs: Vec<GlyphInfo>,
        pub direction: Direction,
    }

    impl ShapingResult {
        pub fn new(glyphs: Vec<GlyphInfo>, direction: Direction) -> Self {
            Self { glyphs, direction }
        }

        pub fn empty(direction: Direction) -> Self {
            Self::new(Vec::new(), direction)
        }

        pub fn is_empty(&self) -> bool {
            self.glyphs.is_empty()
        }
    }

    /// Tightest box around a glyph's ink, font units, y-up
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GlyphExtents {
        pub x_min: f64,
        pub y_min: f64,
        pub x_max: f64,
        pub y_max: f64,
    }

    impl GlyphExtents {
        pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
            Self {
                x_min,
                y_min,
                x_max,
                y_max,
            }
        }

        pub fn width(&self) -> f64 {
            self.x_max - self.x_min
        }

        pub fn height(&self) -> f64 {
            self.y_max - self.y_min
        }
    }

    /// The two forms output can take
    #[derive(Debug, Clone)]
    pub enum RenderOutput {
        Bitmap(BitmapData),
        Vector(VectorData),
    }

    /// Straight (non-premultiplied) RGBA8 pixels, row-major
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// RGBA of one pixel, `None` outside the canvas
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let idx = ((y * self.width + x) * 4) as usize;
            self.data
                .get(idx..idx + 4)
                .map(|px| [px[0], px[1], px[2], px[3]])
        }
    }

    /// A self-contained SVG document
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct VectorData {
        pub data: String,
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn red() -> Self {
        Self::rgba(255, 0, 0, 255)
    }

    pub const fn green() -> Self {
        Self::rgba(0, 128, 0, 255)
    }

    pub const fn blue() -> Self {
        Self::rgba(0, 0, 255, 255)
    }

    pub const fn cyan() -> Self {
        Self::rgba(0, 255, 255, 255)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }
}
