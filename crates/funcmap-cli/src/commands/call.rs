//! Call command implementation

use std::io;

use anyhow::{Context, Result};
use funcmap_core::{FuncMap, Value};

use crate::output::{OutputFormat, write_value};

/// Execute the call command
pub fn execute(
    funcs: &FuncMap,
    name: &str,
    args: &[String],
    raw: bool,
    format: OutputFormat,
) -> Result<()> {
    let values: Vec<Value> = if raw {
        args.iter().map(|arg| Value::from(arg.as_str())).collect()
    } else {
        args.iter().map(String::as_str).map(parse_arg).collect()
    };
    tracing::debug!(function = name, ?values, "parsed arguments");

    let result = funcs
        .call(name, &values)
        .with_context(|| format!("{name} failed"))?;

    let stdout = io::stdout();
    write_value(&mut stdout.lock(), &result, format)
}

/// Interpret a command-line argument as a JSON literal, or as a plain string
/// when it is not valid JSON.
pub fn parse_arg(arg: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(arg)
        .map_or_else(|_| Value::from(arg), Value::from)
}
