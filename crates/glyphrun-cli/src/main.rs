//! glyphrun command-line interface

mod cli;
mod commands;
mod repl;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use cli::{Cli, Commands};
use glyphrun::error::Result;
use glyphrun::Inputs;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Render(args) => commands::render::run(&args),
        Commands::Info(args) => {
            commands::info::run(&args)?;
            Ok(ExitCode::SUCCESS)
        },
        Commands::Glyphs(args) => {
            commands::glyphs::run(&args)?;
            Ok(ExitCode::SUCCESS)
        },
        Commands::Repl(args) => {
            let inputs = Inputs {
                font: args.font.clone(),
                ..Inputs::default()
            };
            let session = commands::build_session(&args.engine, &args.canvas, inputs);
            repl::run_repl(session)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}
