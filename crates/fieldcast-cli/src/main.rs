//! Fieldcast CLI - render object graphs to XML via external mapping tables
//!
//! This is the entry point for the fieldcast binary, providing commands for
//! validating mapping tables and rendering JSON data files to XML.

mod cli;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use output::OutputWriter;
use std::process;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = logging::init(cli.verbosity_level(), cli.use_color()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.quiet, cli.use_color());

    tracing::info!(command = ?cli.command, "executing command");

    match cli.command {
        Commands::Render(args) => handlers::handle_render(args, &output),
        Commands::Validate(args) => handlers::handle_validate(args, &output),
    }
}
