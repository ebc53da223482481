//! Command-line interface definition
//!
//! Argument parsing for the fieldcast binary, built with clap derive.

use clap::{ArgAction, Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Render object graphs to XML driven by an external mapping table
#[derive(Debug, Parser)]
#[command(name = "fieldcast", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether output should be colorized
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }

    /// Effective verbosity level (0 = warn, 1 = info, 2+ = debug)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a data file to XML using a mapping table
    Render(RenderArgs),
    /// Load a mapping table and check its invariants
    Validate(ValidateArgs),
}

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Mapping table file (JSON or YAML array of rows)
    #[arg(short, long)]
    pub mappings: PathBuf,

    /// Source data file (JSON object graph)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 4)]
    pub indent: usize,

    /// Omit the XML declaration line
    #[arg(long)]
    pub no_declaration: bool,
}

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Mapping table file (JSON or YAML array of rows)
    #[arg(short, long)]
    pub mappings: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args_parse() {
        let cli = Cli::try_parse_from([
            "fieldcast", "render", "--mappings", "map.json", "--data", "company.json",
            "--indent", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.mappings, PathBuf::from("map.json"));
                assert_eq!(args.indent, 2);
                assert!(!args.no_declaration);
            }
            other => panic!("expected render command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["fieldcast", "-vv", "validate", "-m", "map.json"]).unwrap();
        assert_eq!(cli.verbosity_level(), 3);

        let quiet = Cli::try_parse_from(["fieldcast", "-q", "validate", "-m", "map.json"]).unwrap();
        assert_eq!(quiet.verbosity_level(), 0);
    }
}
