//! SVG export format
//!
//! Vector output already is an SVG document; it is passed through as UTF-8.

use glyphrun_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::RenderOutput,
};

pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for SvgExporter {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn export(&self, output: &RenderOutput) -> Result<Vec<u8>> {
        match output {
            RenderOutput::Vector(vector) => Ok(vector.data.as_bytes().to_vec()),
            RenderOutput::Bitmap(_) => Err(ExportError::FormatNotSupported(
                "SVG exporter only supports vector output".into(),
            )
            .into()),
        }
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn mime_type(&self) -> &'static str {
        "image/svg+xml"
    }
}
