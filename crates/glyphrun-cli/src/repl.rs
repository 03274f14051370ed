//! Interactive session: change one input, see the run re-rendered
//!
//! Every command that changes an input triggers exactly one refresh of the
//! session, so the status line always describes the inputs as they are now.

use std::path::PathBuf;

use glyphrun::error::{GlyphrunError, Result};
use glyphrun::types::Direction;
use glyphrun::{Session, LANGUAGES};

use crate::cli::parse_point_size;
use crate::commands::save;

/// One line of user input, understood
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Status,
    Languages,
    Quit,
    Text(String),
    Direction(Direction),
    Language(String),
    Font(PathBuf),
    Size(f64),
    Debug(bool),
    Save { format: String, path: PathBuf },
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim_end(), ""),
        };

        let command = match word {
            "help" | "h" | "?" => ReplCommand::Help,
            "status" | "s" => ReplCommand::Status,
            "langs" => ReplCommand::Languages,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            // The text may legitimately be anything, spaces included
            "text" => ReplCommand::Text(rest.to_string()),
            "dir" => ReplCommand::Direction(rest.parse()?),
            "lang" => ReplCommand::Language(required(rest, "lang <tag>")?.to_string()),
            "font" => ReplCommand::Font(PathBuf::from(required(rest, "font <path>")?)),
            "size" => {
                ReplCommand::Size(parse_point_size(rest).map_err(GlyphrunError::ConfigError)?)
            },
            "debug" => ReplCommand::Debug(match rest {
                "on" => true,
                "off" => false,
                _ => return Err(usage("debug on|off")),
            }),
            "save" => {
                let (format, path) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("save svg|png <path>"))?;
                ReplCommand::Save {
                    format: format.to_string(),
                    path: PathBuf::from(path.trim()),
                }
            },
            other => {
                return Err(GlyphrunError::ConfigError(format!(
                    "Unknown command: {} (type 'help')",
                    other
                )))
            },
        };
        Ok(command)
    }
}

fn required<'a>(value: &'a str, form: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(usage(form))
    } else {
        Ok(value)
    }
}

fn usage(form: &str) -> GlyphrunError {
    GlyphrunError::ConfigError(format!("Usage: {}", form))
}

/// What the loop should show after a command
#[derive(Debug, PartialEq)]
pub enum Reply {
    /// Inputs changed and the session re-rendered; carries the status line
    Refreshed { message: String, failed: bool },
    Text(String),
    Saved(PathBuf),
    Quit,
}

pub fn execute(session: &mut Session, command: ReplCommand) -> Result<Reply> {
    match command {
        ReplCommand::Help => return Ok(Reply::Text(HELP.to_string())),
        ReplCommand::Status => return Ok(Reply::Text(status(session))),
        ReplCommand::Languages => {
            let list: Vec<String> = LANGUAGES
                .iter()
                .map(|(tag, name)| format!("  {}  {}", tag, name))
                .collect();
            return Ok(Reply::Text(list.join("\n")));
        },
        ReplCommand::Quit => return Ok(Reply::Quit),
        ReplCommand::Save { format, path } => {
            let artifacts = session.current().artifacts().ok_or_else(|| {
                GlyphrunError::ConfigError(format!(
                    "Nothing to save: {}",
                    session.current().message()
                ))
            })?;
            save(artifacts, &format, &path)?;
            return Ok(Reply::Saved(path));
        },
        ReplCommand::Text(text) => session.set_text(text),
        ReplCommand::Direction(direction) => session.set_direction(direction),
        ReplCommand::Language(language) => session.set_language(language),
        ReplCommand::Font(path) => session.set_font(path),
        ReplCommand::Size(size) => session.set_point_size(size),
        ReplCommand::Debug(enabled) => session.set_debug_overlay(enabled),
    };

    let outcome = session.refresh();
    Ok(Reply::Refreshed {
        message: outcome.message(),
        failed: outcome.is_failed(),
    })
}

fn status(session: &Session) -> String {
    let inputs = session.inputs();
    let font = inputs
        .font
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!(
        "Font:      {}\nText:      {}\nDirection: {}\nLanguage:  {}\n\
         Size:      {}\nOverlay:   {}\nStatus:    {}",
        font,
        inputs.text,
        inputs.direction,
        inputs.language,
        inputs.point_size,
        if inputs.debug_overlay { "on" } else { "off" },
        session.current().message(),
    )
}

const HELP: &str = "\
Commands:
  text <text>            Set the text to render
  dir ltr|rtl            Set the text direction
  lang <tag>             Set the language tag ('langs' lists common ones)
  font <path>            Choose a font file
  size <px>              Set the raster em size
  debug on|off           Toggle the debug overlay
  save svg|png <path>    Write the current rendering
  status, s              Show inputs and the last result
  help, h, ?             Show this help
  quit, exit, q          Leave";

#[cfg(feature = "repl")]
pub fn run_repl(mut session: Session) -> Result<()> {
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let readline_error = |e: ReadlineError| GlyphrunError::ConfigError(e.to_string());

    println!("{}", "glyphrun interactive".bold().cyan());
    println!("{}", "Type 'help' for commands, 'quit' to leave".dimmed());
    println!("{}", session.refresh().message());

    let mut rl = DefaultEditor::new().map_err(readline_error)?;
    loop {
        let prompt = format!("{}> ", "glyphrun".green().bold());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str()).map_err(readline_error)?;

                let reply = ReplCommand::parse(&line).and_then(|cmd| execute(&mut session, cmd));
                match reply {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Ok(Reply::Saved(path)) => {
                        println!("{} {}", "Saved".green(), path.display());
                    },
                    Ok(Reply::Refreshed { message, failed }) => {
                        if failed {
                            println!("{}", message.red());
                        } else {
                            println!("{}", message.cyan());
                        }
                    },
                    Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C (use 'quit' or ^D to leave)".yellow());
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(readline_error(e)),
        }
    }
    Ok(())
}

#[cfg(not(feature = "repl"))]
pub fn run_repl(_session: Session) -> Result<()> {
    Err(GlyphrunError::ConfigError(
        "interactive mode not compiled in; rebuild with --features repl".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use glyphrun::prelude::*;
    use glyphrun::types::{GlyphExtents, GlyphId};
    use kurbo::BezPath;

    struct Bars;

    impl FontOutlines for Bars {
        fn identity(&self) -> &str {
            "bars"
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_count(&self) -> u32 {
            4
        }

        fn glyph_extents(&self, _glyph_id: GlyphId) -> Option<GlyphExtents> {
            Some(GlyphExtents::new(0.0, 0.0, 50.0, 500.0))
        }

        fn glyph_outline(&self, _glyph_id: GlyphId) -> Result<BezPath> {
            let mut path = BezPath::new();
            path.move_to((0.0, 0.0));
            path.line_to((50.0, 0.0));
            path.line_to((50.0, 500.0));
            path.close_path();
            Ok(path)
        }
    }

    struct AnyFont;

    impl FontLoader for AnyFont {
        fn load(&self, _path: &Path) -> Result<Arc<dyn FontOutlines>> {
            Ok(Arc::new(Bars))
        }
    }

    struct Counting(AtomicUsize);

    impl Shaper for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn shape(&self, request: &ShapingRequest) -> Result<ShapingResult> {
            self.0.fetch_add(1, Ordering::SeqCst);
            let glyphs = (0..request.text.chars().count() as u32)
                .map(|i| GlyphInfo::new(1 + i % 3, 0, 0, 300, 0, i))
                .collect();
            Ok(ShapingResult::new(glyphs, request.direction))
        }
    }

    fn session() -> (Session, Arc<Counting>) {
        let shaper = Arc::new(Counting(AtomicUsize::new(0)));
        let session = Session::builder()
            .shaper(shaper.clone())
            .font_loader(Arc::new(AnyFont))
            .build();
        (session, shaper)
    }

    #[test]
    fn parses_every_command_form() {
        let cases = [
            ("text  hello world ", ReplCommand::Text("hello world".into())),
            ("dir ltr", ReplCommand::Direction(Direction::LeftToRight)),
            ("lang fas", ReplCommand::Language("fas".into())),
            ("font /tmp/a.ttf", ReplCommand::Font("/tmp/a.ttf".into())),
            ("size 64", ReplCommand::Size(64.0)),
            ("debug on", ReplCommand::Debug(true)),
            (
                "save png out/run.png",
                ReplCommand::Save {
                    format: "png".into(),
                    path: "out/run.png".into(),
                },
            ),
            ("q", ReplCommand::Quit),
        ];
        for (line, expected) in cases {
            assert_eq!(ReplCommand::parse(line).unwrap(), expected, "{}", line);
        }
    }

    #[test]
    fn rejects_malformed_commands() {
        for line in ["dir up", "size -3", "debug maybe", "save png", "lang", "frobnicate"] {
            assert!(ReplCommand::parse(line).is_err(), "{} should not parse", line);
        }
    }

    #[test]
    fn each_change_recomputes_exactly_once() {
        let (mut session, shaper) = session();
        let script = [
            "font /fonts/bars.ttf",
            "text abc",
            "dir ltr",
            "lang eng",
            "size 24",
            "status",
            "help",
        ];
        for line in script {
            execute(&mut session, ReplCommand::parse(line).unwrap()).unwrap();
        }
        // The font change alone shapes nothing: there is no text yet
        assert_eq!(shaper.0.load(Ordering::SeqCst), 4);
        assert_eq!(session.current().message(), "3 glyphs rendered.");
    }

    #[test]
    fn refresh_reply_carries_status_line() {
        let (mut session, _) = session();
        let reply = execute(&mut session, ReplCommand::Text("ab".into())).unwrap();
        assert_eq!(
            reply,
            Reply::Refreshed {
                message: "Choose a font file to begin.".into(),
                failed: false
            }
        );
    }

    #[test]
    fn save_needs_a_rendering() {
        let (mut session, _) = session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.svg");
        let save = ReplCommand::Save {
            format: "svg".into(),
            path: path.clone(),
        };
        assert!(execute(&mut session, save.clone()).is_err());

        execute(&mut session, ReplCommand::Font("/fonts/bars.ttf".into())).unwrap();
        execute(&mut session, ReplCommand::Text("ab".into())).unwrap();
        assert_eq!(execute(&mut session, save).unwrap(), Reply::Saved(path.clone()));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
    }
}
