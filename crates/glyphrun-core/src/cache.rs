//! Per-font bounding-box cache
//!
//! Aggregating extents walks every glyph in the font, so the result is kept
//! per font identity and only recomputed when a different font shows up.
//! Text, direction and language changes never touch it.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::{bbox::BoundingBox, traits::FontOutlines};

const DEFAULT_CAPACITY: usize = 8;

/// LRU of aggregated boxes keyed by [`FontOutlines::identity`]
pub struct BoundingBoxCache {
    cache: Mutex<LruCache<String, BoundingBox>>,
}

impl BoundingBoxCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached box for this font, aggregating it on first sight
    pub fn get_or_compute(&self, font: &dyn FontOutlines) -> BoundingBox {
        if let Some(bbox) = self.cache.lock().get(font.identity()) {
            return *bbox;
        }

        let bbox = BoundingBox::aggregate(font);
        self.cache.lock().put(font.identity().to_string(), bbox);
        bbox
    }

    pub fn get(&self, identity: &str) -> Option<BoundingBox> {
        self.cache.lock().get(identity).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

impl Default for BoundingBoxCache {
    fn default() -> Self {
        Self::new()
    }
}
