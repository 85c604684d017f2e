//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # Call a helper; arguments are JSON literals, falling back to strings
//! funcmap call dateFormat "Jan 2, 2006" 2024-03-09
//! funcmap call --format json dict title Home depth 2
//! funcmap call loop 3
//!
//! # Force every argument to be a string
//! funcmap call --raw split 1,2,3 ,
//!
//! # Show registered helpers
//! funcmap list
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Main CLI structure for the `funcmap` command
#[derive(Parser, Clone, Debug)]
#[command(name = "funcmap")]
#[command(version)]
#[command(about = "funcmap - call template helper functions from the shell", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress warnings (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file; must exist. `FUNCMAP_CONFIG` sets an
    /// optional location instead.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `funcmap` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Call a helper by its template name
    Call {
        /// Helper name as used in templates (e.g. `dateFormat`)
        name: String,

        /// Arguments, each parsed as a JSON literal or taken as a string
        #[arg(value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,

        /// Pass every argument as a plain string
        #[arg(long)]
        raw: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List registered helper names
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_call_collects_hyphenated_args() {
        let cli = Cli::parse_from(["funcmap", "call", "loop", "-3"]);
        match cli.command {
            Commands::Call { name, args, .. } => {
                assert_eq!(name, "loop");
                assert_eq!(args, ["-3"]);
            },
            Commands::List { .. } => panic!("expected call"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["funcmap", "list", "--format", "json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::List {
                format: OutputFormat::Json
            }
        ));
    }
}
