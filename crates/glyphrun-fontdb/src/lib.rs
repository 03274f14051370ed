//! Where fonts come to life: loading and glyph access for glyphrun
//!
//! [`Font`] is the outline provider the renderers and the bounding-box
//! aggregator read from. It keeps the raw bytes and parses them on demand
//! with `read-fonts` / `skrifa`, so one loaded font can be shared freely
//! behind an `Arc`.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kurbo::{BezPath, Shape};
use parking_lot::RwLock;
use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    string::StringId,
    MetadataProvider,
};

use glyphrun_core::{
    error::{FontLoadError, RenderError, Result},
    traits::FontOutlines,
    types::{GlyphExtents, GlyphId},
};

/// A font that's been brought into memory, ready to hand out outlines
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    identity: String,
    units_per_em: u16,
    glyph_count: u32,
    family_name: Option<String>,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let identity = format!("{}#{}", canonical.display(), face_index);
        Self::parse(data, face_index, identity)
    }

    /// Turns raw font bytes into a font
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let identity = format!("mem:{:016x}#0", hasher.finish());
        Self::parse(data, 0, identity)
    }

    fn parse(data: Vec<u8>, face_index: u32, identity: String) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        // Everything downstream measures in design units
        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let glyph_count = font_ref
            .maxp()
            .map(|maxp| u32::from(maxp.num_glyphs()))
            .map_err(|_| FontLoadError::NotSupported("missing maxp table".into()))?;

        let family_name = skrifa::FontRef::from_index(&data, face_index)
            .ok()
            .and_then(|font| font.localized_strings(StringId::FAMILY_NAME).english_or_first())
            .map(|name| name.chars().collect::<String>());

        log::debug!(
            "Font: loaded {} ({:?}), upem={}, glyphs={}",
            identity,
            family_name,
            units_per_em,
            glyph_count
        );

        Ok(Self {
            data,
            face_index,
            identity,
            units_per_em,
            glyph_count,
            family_name,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Family name from the `name` table, if present
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Raw font bytes as they live in the file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn skrifa_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontOutlines for Font {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn glyph_extents(&self, glyph_id: GlyphId) -> Option<GlyphExtents> {
        if !self.contains_glyph(glyph_id) {
            return None;
        }
        let font = self.skrifa_ref()?;
        let metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        match metrics.bounds(skrifa::GlyphId::new(glyph_id)) {
            Some(bounds) => Some(GlyphExtents::new(
                f64::from(bounds.x_min),
                f64::from(bounds.y_min),
                f64::from(bounds.x_max),
                f64::from(bounds.y_max),
            )),
            // CFF outlines carry no stored bounds; measure the drawn path instead
            None => outline_extents(&self.glyph_outline(glyph_id).ok()?),
        }
    }

    fn glyph_outline(&self, glyph_id: GlyphId) -> Result<BezPath> {
        if !self.contains_glyph(glyph_id) {
            return Err(RenderError::UnknownGlyph(glyph_id).into());
        }

        let font = self
            .skrifa_ref()
            .ok_or(RenderError::OutlineExtractionFailed(glyph_id))?;
        let glyph = font
            .outline_glyphs()
            .get(skrifa::GlyphId::new(glyph_id))
            .ok_or(RenderError::OutlineExtractionFailed(glyph_id))?;

        let mut pen = BezPathPen::default();
        let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
        glyph
            .draw(settings, &mut pen)
            .map_err(|_| RenderError::OutlineExtractionFailed(glyph_id))?;

        Ok(pen.path)
    }
}

/// Tight extents of an outline, `None` when it draws nothing
fn outline_extents(path: &BezPath) -> Option<GlyphExtents> {
    if path.elements().is_empty() {
        return None;
    }
    let rect = path.bounding_box();
    Some(GlyphExtents::new(rect.x0, rect.y0, rect.x1, rect.y1))
}

/// Collects skrifa's drawing commands into a kurbo path, font units, y-up
#[derive(Default)]
struct BezPathPen {
    path: BezPath,
}

impl skrifa::outline::OutlinePen for BezPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((f64::from(cx0), f64::from(cy0)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(cx1), f64::from(cy1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Your font library: loads each file once
pub struct FontDatabase {
    /// Maps canonical paths to their loaded fonts
    path_cache: RwLock<HashMap<PathBuf, Arc<Font>>>,
}

impl FontDatabase {
    /// Starts with an empty library
    pub fn new() -> Self {
        Self {
            path_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Loads a font file, or returns the copy already in memory
    pub fn load_font(&self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(font) = self.path_cache.read().get(&cache_key) {
            return Ok(font.clone());
        }

        let font = Arc::new(Font::from_file(path)?);
        self.path_cache.write().insert(cache_key, font.clone());
        Ok(font)
    }

    /// Drops a font so the next load rereads it from disk
    pub fn evict(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.path_cache.write().remove(&cache_key).is_some()
    }

    /// Returns the number of fonts currently loaded
    pub fn font_count(&self) -> usize {
        self.path_cache.read().len()
    }

    /// Clears all loaded fonts from the database
    pub fn clear(&self) {
        self.path_cache.write().clear();
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
