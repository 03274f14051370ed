//! Glyphrun: shaped text drawn twice, as SVG and as pixels
//!
//! A [`Session`] holds the current inputs (font, text, direction, language,
//! point size, debug overlay). Every change bumps a generation; a full
//! pipeline run is tagged with the generation it started from, and its result
//! is thrown away if the inputs moved on in the meantime.
//!
//! ```no_run
//! use glyphrun::prelude::*;
//!
//! let mut session = Session::builder().build();
//! session.set_font("fonts/NotoNastaliqUrdu.ttf");
//! session.set_text("سلام");
//! session.set_direction(Direction::RightToLeft);
//!
//! let outcome = session.refresh();
//! println!("{}", outcome.message());
//! ```

pub use glyphrun_core::{error, traits, types, BoundingBox, Color, RunLayout};

pub use glyphrun_export as export;
pub use glyphrun_fontdb as fontdb;
pub use glyphrun_render_skia as render_skia;
pub use glyphrun_render_svg as render_svg;
pub use glyphrun_shape_proc as shape_proc;

mod loader;
mod session;

pub use loader::FontLoader;
pub use session::{
    Artifacts, IdleReason, Inputs, Outcome, Session, SessionBuilder, Ticket, LANGUAGES,
};

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{Artifacts, FontLoader, IdleReason, Outcome, Session, Ticket};
    pub use glyphrun_core::{
        error::{GlyphrunError, Result},
        traits::{Exporter, FontOutlines, Renderer, Shaper},
        types::{Direction, GlyphInfo, RenderOutput, ShapingRequest, ShapingResult},
        BoundingBox, Color,
    };
}
