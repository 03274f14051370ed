//! Export module for glyphrun
//!
//! Encoders for the two render outputs, plus [`write_output`], which places
//! the encoded bytes on disk atomically.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use glyphrun_core::{
    error::{ExportError, Result},
    traits::Exporter,
};

pub mod png;
pub mod svg;

pub use png::PngExporter;
pub use svg::SvgExporter;

/// Pick an exporter by format name or file extension
pub fn exporter_for(format: &str) -> Result<Box<dyn Exporter>> {
    match format.to_ascii_lowercase().as_str() {
        "png" => Ok(Box::new(PngExporter::new())),
        "svg" => Ok(Box::new(SvgExporter::new())),
        other => Err(ExportError::FormatNotSupported(other.to_string()).into()),
    }
}

/// Write `bytes` to `path` without ever leaving a half-written file behind
///
/// The data goes into a temporary file next to the destination, which is then
/// renamed over it. If anything fails the temporary file is removed when its
/// guard drops.
pub fn write_output(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_failed =
        |e: std::io::Error| ExportError::WriteFailed(format!("{}: {}", path.display(), e));

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(bytes).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    log::debug!("Export: wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exporter_lookup_is_case_insensitive() {
        assert_eq!(exporter_for("PNG").unwrap().name(), "png");
        assert_eq!(exporter_for("svg").unwrap().mime_type(), "image/svg+xml");
        assert!(exporter_for("gif").is_err());
    }
}
