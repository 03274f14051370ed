//! Render command: one session refresh, artifacts written to disk

use std::process::ExitCode;

use glyphrun::error::Result;
use glyphrun::{Inputs, Outcome};

use super::{build_session, save};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<ExitCode> {
    let inputs = Inputs {
        font: Some(args.font.clone()),
        text: args.text.clone(),
        direction: args.direction,
        language: args.language.clone(),
        point_size: args.size,
        debug_overlay: args.debug_overlay,
    };
    let mut session = build_session(&args.engine, &args.canvas, inputs);

    let outcome = session.refresh();
    match outcome {
        Outcome::Ready(artifacts) => {
            for glyph in &artifacts.glyphs {
                log::debug!("{}", glyph);
            }
            if let Some(path) = &args.svg {
                save(artifacts, "svg", path)?;
            }
            if let Some(path) = &args.png {
                save(artifacts, "png", path)?;
            }
            if args.svg.is_none() && args.png.is_none() {
                log::warn!("No --svg or --png given; nothing written");
            }
            println!("{}", outcome.message());
            Ok(ExitCode::SUCCESS)
        },
        Outcome::Idle(_) => {
            println!("{}", outcome.message());
            Ok(ExitCode::SUCCESS)
        },
        Outcome::Failed(_) => {
            eprintln!("{}", outcome.message());
            Ok(ExitCode::FAILURE)
        },
    }
}
