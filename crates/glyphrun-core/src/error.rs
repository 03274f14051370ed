//! Error types for glyphrun

use std::time::Duration;

use thiserror::Error;

use crate::types::GlyphId;

pub type Result<T> = std::result::Result<T, GlyphrunError>;

/// Main error type for glyphrun
#[derive(Debug, Error)]
pub enum GlyphrunError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    Shaping(#[from] ShapingError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlyphrunError {
    /// Diagnostic text captured from the shaping engine, if this error carries any
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            GlyphrunError::Shaping(ShapingError::ProcessFailed { diagnostic, .. })
                if !diagnostic.is_empty() =>
            {
                Some(diagnostic)
            },
            _ => None,
        }
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font not supported: {0}")]
    NotSupported(String),
}

/// Errors raised while running or reading the external shaping engine
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("could not start shaping engine {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("shaping engine failed ({status}): {diagnostic}")]
    ProcessFailed { status: String, diagnostic: String },

    #[error("malformed shaping output on line {line} ({reason}): {content:?}")]
    MalformedOutput {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("shaping engine timed out after {after:?}")]
    Timeout { after: Duration },
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Glyph {0} is not part of the font's glyph order")]
    UnknownGlyph(GlyphId),

    #[error("Nothing to render: the glyph run is empty")]
    EmptyRun,

    #[error("Failed to extract outline for glyph {0}")]
    OutlineExtractionFailed(GlyphId),

    #[error("Failed to build glyph path")]
    PathBuildingFailed,

    #[error("Failed to allocate a {width}x{height} canvas")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
