//! How a session turns a font path into glyph data

use std::path::Path;
use std::sync::Arc;

use glyphrun_core::{error::Result, traits::FontOutlines};
use glyphrun_fontdb::FontDatabase;

/// Resolves font paths to outline providers
///
/// Loading must be cheap to repeat: a session asks again on every recompute.
pub trait FontLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Arc<dyn FontOutlines>>;
}

impl FontLoader for FontDatabase {
    fn load(&self, path: &Path) -> Result<Arc<dyn FontOutlines>> {
        let font: Arc<dyn FontOutlines> = self.load_font(path)?;
        Ok(font)
    }
}
