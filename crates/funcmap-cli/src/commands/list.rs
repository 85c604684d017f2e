//! List command implementation

use std::io::{self, Write};

use anyhow::Result;
use funcmap_core::FuncMap;

use crate::output::{OutputFormat, write_json};

/// Execute the list command
pub fn execute(funcs: &FuncMap, format: OutputFormat) -> Result<()> {
    let names: Vec<&str> = funcs.names().collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{name}")?;
            }
        },
        OutputFormat::Json => write_json(&mut out, &names)?,
    }
    Ok(())
}
