//! Command-line arguments, declared with clap derive

use clap::{Args, Parser, Subcommand};
use std::ops::Range;
use std::path::PathBuf;

use glyphrun::shape_proc::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use glyphrun::types::Direction;

/// Glyphrun - shape text with an external engine, draw it as SVG and PNG
#[derive(Parser, Debug)]
#[command(name = "glyphrun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log every pipeline stage
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shape and render one run of text
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Display units per em, glyph count and aggregated bounds of a font
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Draw glyphs one by one with their ink boxes, by glyph id
    #[command(alias = "g")]
    Glyphs(GlyphsArgs),

    /// Edit inputs interactively; every change re-renders
    Repl(Box<ReplArgs>),
}

/// Which engine shapes the text
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Shaping engine binary
    #[arg(long = "shaper", env = "GLYPHRUN_SHAPER", default_value = DEFAULT_PROGRAM)]
    pub shaper: PathBuf,

    /// Give up on the engine after this many milliseconds
    #[arg(long = "timeout-ms", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,
}

/// Raster canvas settings
#[derive(Args, Debug, Clone)]
pub struct CanvasArgs {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Distance of the pen anchor from the canvas edges, in pixels
    #[arg(long, default_value_t = 100.0)]
    pub margin: f32,

    /// Leave out the baseline and origin guide lines
    #[arg(long = "no-guides")]
    pub no_guides: bool,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Text to render
    pub text: String,

    /// Font file path (.ttf, .otf)
    #[arg(short = 'f', long = "font")]
    pub font: PathBuf,

    /// Text direction: ltr or rtl
    #[arg(short = 'd', long, default_value = "rtl", value_parser = parse_direction)]
    pub direction: Direction,

    /// Language tag handed to the engine (urd, ara, fas, pus, snd, eng, ...)
    #[arg(short = 'l', long, default_value = "urd")]
    pub language: String,

    /// Raster em size in pixels
    #[arg(short = 's', long = "size", default_value_t = 48.0, value_parser = parse_point_size)]
    pub size: f64,

    /// Write the SVG document here
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Write the raster image here
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Draw ink boxes, offsets and advances under each glyph
    #[arg(long = "debug-overlay")]
    pub debug_overlay: bool,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Font file path
    #[arg(short = 'f', long = "font")]
    pub font: PathBuf,
}

/// Arguments for the glyphs command
#[derive(Args, Debug)]
pub struct GlyphsArgs {
    /// Font file path
    #[arg(short = 'f', long = "font")]
    pub font: PathBuf,

    /// Glyph ids to show, end exclusive; clamped to the font's glyph count
    #[arg(short = 'r', long, default_value = "0..10", value_parser = parse_glyph_range)]
    pub range: Range<u32>,

    /// Write one SVG per glyph into this directory
    #[arg(short = 'o', long = "out-dir")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the repl command
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Font to start with
    #[arg(short = 'f', long = "font")]
    pub font: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    s.parse().map_err(|e: glyphrun::error::GlyphrunError| e.to_string())
}

pub(crate) fn parse_point_size(s: &str) -> Result<f64, String> {
    let size: f64 = s.parse().map_err(|_| format!("not a number: {}", s))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("point size must be positive, got {}", s))
    }
}

fn parse_glyph_range(s: &str) -> Result<Range<u32>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {}", s))?;
    let number = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| format!("not a glyph id: {}", v))
    };
    let range = number(start)?..number(end)?;
    if range.is_empty() {
        return Err(format!("empty glyph range: {}", s));
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_follow_the_urdu_setup() {
        let cli = Cli::try_parse_from(["glyphrun", "render", "سلام", "-f", "font.ttf"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.direction, Direction::RightToLeft);
        assert_eq!(args.language, "urd");
        assert_eq!(args.size, 48.0);
        assert_eq!((args.canvas.width, args.canvas.height), (1200, 200));
        assert!(!args.canvas.no_guides);
        assert_eq!(args.engine.timeout_ms, 10_000);
    }

    #[test]
    fn render_accepts_alias_and_overrides() {
        let cli = Cli::try_parse_from([
            "glyphrun", "r", "abc", "-f", "font.ttf", "-d", "LTR", "-l", "eng", "-s", "72",
            "--svg", "out.svg", "--no-guides", "--timeout-ms", "250", "--shaper", "/opt/raqm",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.direction, Direction::LeftToRight);
        assert_eq!(args.size, 72.0);
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        assert!(args.canvas.no_guides);
        assert_eq!(args.engine.timeout_ms, 250);
        assert_eq!(args.engine.shaper, PathBuf::from("/opt/raqm"));
    }

    #[test]
    fn bad_direction_and_size_are_rejected() {
        assert!(Cli::try_parse_from(["glyphrun", "render", "a", "-f", "x", "-d", "ttb"]).is_err());
        assert!(Cli::try_parse_from(["glyphrun", "render", "a", "-f", "x", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["glyphrun", "render", "a", "-f", "x", "-s", "big"]).is_err());
    }

    #[test]
    fn glyphs_default_to_the_first_ten() {
        let cli = Cli::try_parse_from(["glyphrun", "glyphs", "-f", "font.ttf"]).unwrap();
        let Commands::Glyphs(args) = cli.command else {
            panic!("expected glyphs");
        };
        assert_eq!(args.range, 0..10);
        assert_eq!(args.out_dir, None);

        let cli =
            Cli::try_parse_from(["glyphrun", "g", "-f", "font.ttf", "-r", "20..25", "-o", "out"])
                .unwrap();
        let Commands::Glyphs(args) = cli.command else {
            panic!("expected glyphs");
        };
        assert_eq!(args.range, 20..25);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn glyph_range_must_be_ordered_ids() {
        assert_eq!(parse_glyph_range("3..4"), Ok(3..4));
        for bad in ["5..5", "9..2", "3", "a..4", "-1..4"] {
            assert!(parse_glyph_range(bad).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn render_requires_a_font() {
        assert!(Cli::try_parse_from(["glyphrun", "render", "abc"]).is_err());
    }
}
