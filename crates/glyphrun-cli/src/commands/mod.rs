//! Subcommand implementations

pub mod glyphs;
pub mod info;
pub mod render;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use glyphrun::error::Result;
use glyphrun::export::{exporter_for, write_output};
use glyphrun::render_skia::RasterParams;
use glyphrun::shape_proc::ProcessShaper;
use glyphrun::{Artifacts, Inputs, Session};

use crate::cli::{CanvasArgs, EngineArgs};

/// A session wired to the configured engine and canvas
pub fn build_session(engine: &EngineArgs, canvas: &CanvasArgs, inputs: Inputs) -> Session {
    let shaper = ProcessShaper::new(engine.shaper.clone())
        .with_timeout(Duration::from_millis(engine.timeout_ms));
    log::debug!(
        "Shaping with {} (timeout {:?})",
        shaper.program().display(),
        shaper.timeout()
    );

    Session::builder()
        .shaper(Arc::new(shaper))
        .raster_params(RasterParams {
            width: canvas.width,
            height: canvas.height,
            margin: canvas.margin,
            guides: !canvas.no_guides,
            ..RasterParams::default()
        })
        .inputs(inputs)
        .build()
}

/// Encode one artifact by format name and write it atomically
pub fn save(artifacts: &Artifacts, format: &str, path: &Path) -> Result<()> {
    let exporter = exporter_for(format)?;
    let output = match exporter.name() {
        "svg" => &artifacts.vector,
        _ => &artifacts.raster,
    };
    let bytes = exporter.export(output)?;
    write_output(path, &bytes)?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
