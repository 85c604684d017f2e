//! funcmap CLI - call template helpers from the shell
//!
//! Lets template authors see exactly what a helper returns for a given set
//! of arguments without rendering a whole template.

use anyhow::{Context, Result};
use clap::Parser;
use funcmap_core::{Config, FuncMap};

mod cli;
mod commands;
mod output;
mod utils;

pub use cli::{Cli, Commands};
pub use output::OutputFormat;

/// Parse arguments, initialize logging and execute the selected command.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the configuration is
/// invalid, or the helper call fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    utils::initialize_logging(&cli)?;

    let config = load_config(&cli)?;
    let funcs = FuncMap::new(config);

    match cli.command {
        Commands::Call {
            name,
            args,
            raw,
            format,
        } => commands::call(&funcs, &name, &args, raw, format),
        Commands::List { format } => commands::list(&funcs, format),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let Some(path) = &cli.config else {
        return Config::load().context("Failed to load config");
    };
    let mut config = Config::from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.apply_env().context("Invalid time zone override")?;
    Ok(config)
}
