//! Recompute-on-change driver for the whole pipeline

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glyphrun_core::{
    error::{GlyphrunError, Result},
    traits::{FontOutlines, Renderer, Shaper},
    types::{Direction, GlyphInfo, RenderOutput, ShapingRequest},
    BoundingBox, BoundingBoxCache, RunLayout,
};
use glyphrun_fontdb::FontDatabase;
use glyphrun_render_skia::{RasterParams, SkiaRenderer};
use glyphrun_render_svg::SvgRenderer;
use glyphrun_shape_proc::ProcessShaper;

use crate::loader::FontLoader;

/// Language tags offered for selection; any other tag is passed through as-is
pub const LANGUAGES: [(&str, &str); 6] = [
    ("urd", "Urdu"),
    ("ara", "Arabic"),
    ("fas", "Persian"),
    ("pus", "Pashto"),
    ("snd", "Sindhi"),
    ("eng", "English"),
];

/// Everything a pipeline run depends on
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub font: Option<PathBuf>,
    pub text: String,
    pub direction: Direction,
    pub language: String,
    /// Raster em size in pixels
    pub point_size: f64,
    pub debug_overlay: bool,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            font: None,
            text: String::new(),
            direction: Direction::RightToLeft,
            language: "urd".to_string(),
            point_size: 48.0,
            debug_overlay: false,
        }
    }
}

/// Identifies the input generation a computation started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why nothing was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    NoFont,
    NoText,
}

/// Everything one successful run produced
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub glyphs: Vec<GlyphInfo>,
    /// Aggregated font extents, margin included
    pub bbox: BoundingBox,
    /// Layout in font units, as drawn into the SVG document
    pub vector_layout: RunLayout,
    /// Layout in pixels, as painted onto the canvas
    pub raster_layout: RunLayout,
    pub vector: RenderOutput,
    pub raster: RenderOutput,
}

/// The result of one pipeline run
#[derive(Debug)]
pub enum Outcome {
    Idle(IdleReason),
    Ready(Box<Artifacts>),
    Failed(GlyphrunError),
}

impl Outcome {
    /// One-line status for the user
    pub fn message(&self) -> String {
        match self {
            Outcome::Idle(IdleReason::NoFont) => "Choose a font file to begin.".to_string(),
            Outcome::Idle(IdleReason::NoText) => "Enter text to render.".to_string(),
            Outcome::Ready(artifacts) => format!("{} glyphs rendered.", artifacts.glyphs.len()),
            Outcome::Failed(err) => format!("Processing failed: {}", err),
        }
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        match self {
            Outcome::Ready(artifacts) => Some(&**artifacts),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Holds the inputs and the last committed outcome
pub struct Session {
    shaper: Arc<dyn Shaper>,
    fonts: Arc<dyn FontLoader>,
    svg: SvgRenderer,
    raster: RasterParams,
    bboxes: BoundingBoxCache,
    inputs: Inputs,
    generation: u64,
    current: Outcome,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// The last outcome that was committed
    pub fn current(&self) -> &Outcome {
        &self.current
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.ticket()
    }

    pub fn set_font(&mut self, path: impl Into<PathBuf>) -> Ticket {
        self.inputs.font = Some(path.into());
        self.bump()
    }

    pub fn clear_font(&mut self) -> Ticket {
        self.inputs.font = None;
        self.bump()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Ticket {
        self.inputs.text = text.into();
        self.bump()
    }

    pub fn set_direction(&mut self, direction: Direction) -> Ticket {
        self.inputs.direction = direction;
        self.bump()
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> Ticket {
        self.inputs.language = language.into();
        self.bump()
    }

    pub fn set_point_size(&mut self, point_size: f64) -> Ticket {
        self.inputs.point_size = point_size;
        self.bump()
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) -> Ticket {
        self.inputs.debug_overlay = enabled;
        self.bump()
    }

    fn bump(&mut self) -> Ticket {
        self.generation += 1;
        self.ticket()
    }

    /// Run the whole pipeline for the current inputs without installing the result
    pub fn compute(&self) -> (Ticket, Outcome) {
        let ticket = self.ticket();
        let inputs = &self.inputs;

        let Some(font_path) = inputs.font.as_deref() else {
            return (ticket, Outcome::Idle(IdleReason::NoFont));
        };
        if inputs.text.is_empty() {
            return (ticket, Outcome::Idle(IdleReason::NoText));
        }

        let outcome = match self.run(font_path) {
            Ok(artifacts) => Outcome::Ready(Box::new(artifacts)),
            Err(err) => {
                log::warn!("Session {}: {}", ticket, err);
                Outcome::Failed(err)
            },
        };
        (ticket, outcome)
    }

    /// Install `outcome` if `ticket` still names the current inputs
    ///
    /// Returns `false` (and drops the outcome) when the inputs changed after
    /// the computation started.
    pub fn commit(&mut self, ticket: Ticket, outcome: Outcome) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Session: discarding stale outcome {} (current {})",
                ticket,
                self.ticket()
            );
            return false;
        }
        self.current = outcome;
        true
    }

    /// Compute and commit in one go
    pub fn refresh(&mut self) -> &Outcome {
        let (ticket, outcome) = self.compute();
        self.commit(ticket, outcome);
        &self.current
    }

    fn run(&self, font_path: &Path) -> Result<Artifacts> {
        let inputs = &self.inputs;
        let font = self.fonts.load(font_path)?;
        let bbox = self.bboxes.get_or_compute(font.as_ref());

        let request = ShapingRequest::new(
            font_path,
            inputs.text.clone(),
            inputs.direction,
            inputs.language.clone(),
        );
        let shaped = self.shaper.shape(&request)?;
        log::debug!(
            "Session: {} produced {} glyphs",
            self.shaper.name(),
            shaped.glyphs.len()
        );

        let (vector_layout, vector) = draw(
            &self.svg,
            &shaped.glyphs,
            shaped.direction,
            &bbox,
            font.as_ref(),
        )?;

        let raster_renderer = SkiaRenderer::with_params(RasterParams {
            point_size: inputs.point_size,
            debug_overlay: inputs.debug_overlay,
            ..self.raster.clone()
        });
        let (raster_layout, raster) = draw(
            &raster_renderer,
            &shaped.glyphs,
            shaped.direction,
            &bbox,
            font.as_ref(),
        )?;

        Ok(Artifacts {
            glyphs: shaped.glyphs,
            bbox,
            vector_layout,
            raster_layout,
            vector,
            raster,
        })
    }
}

/// Lay out for one renderer's units, then render
fn draw(
    renderer: &dyn Renderer,
    glyphs: &[GlyphInfo],
    direction: Direction,
    bbox: &BoundingBox,
    font: &dyn FontOutlines,
) -> Result<(RunLayout, RenderOutput)> {
    let layout = RunLayout::compute(glyphs, direction, renderer.layout_scale(font.units_per_em()));
    let output = renderer.render(&layout, bbox, font)?;
    Ok((layout, output))
}

/// Assemble a session, defaulting to the real engine and on-disk fonts
pub struct SessionBuilder {
    shaper: Option<Arc<dyn Shaper>>,
    fonts: Option<Arc<dyn FontLoader>>,
    svg: SvgRenderer,
    raster: RasterParams,
    inputs: Inputs,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            shaper: None,
            fonts: None,
            svg: SvgRenderer::new(),
            raster: RasterParams::default(),
            inputs: Inputs::default(),
        }
    }

    /// Choose who turns text into glyphs
    pub fn shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Choose where fonts come from
    pub fn font_loader(mut self, fonts: Arc<dyn FontLoader>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn svg_renderer(mut self, svg: SvgRenderer) -> Self {
        self.svg = svg;
        self
    }

    /// Canvas settings; point size and overlay still follow the session inputs
    pub fn raster_params(mut self, raster: RasterParams) -> Self {
        self.raster = raster;
        self
    }

    /// Starting inputs
    pub fn inputs(mut self, inputs: Inputs) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn build(self) -> Session {
        Session {
            shaper: self
                .shaper
                .unwrap_or_else(|| Arc::new(ProcessShaper::default())),
            fonts: self
                .fonts
                .unwrap_or_else(|| Arc::new(FontDatabase::new())),
            svg: self.svg,
            raster: self.raster,
            bboxes: BoundingBoxCache::new(),
            inputs: self.inputs,
            generation: 0,
            current: Outcome::Idle(IdleReason::NoFont),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
