//! Output formatting for helper results.
//!
//! - **Text**: the value's display form, one line (lists of strings print one
//!   entry per line so shell pipelines can consume them)
//! - **JSON**: the value's serde form, pretty-printed

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use funcmap_core::Value;
use serde::Serialize;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Write a helper result to `out` in the requested format.
pub fn write_value(out: &mut impl Write, value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, value)?,
        OutputFormat::Json => write_json(out, value)?,
    }
    Ok(())
}

/// Write any serializable payload as pretty JSON followed by a newline.
pub fn write_json(out: &mut impl Write, payload: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut impl Write, value: &Value) -> Result<()> {
    match value {
        Value::List(items) if items.iter().all(|item| matches!(item, Value::String(_))) => {
            for item in items {
                writeln!(out, "{item}")?;
            }
        },
        other => writeln!(out, "{other}")?,
    }
    Ok(())
}
