//! # funcmap-core
//!
//! Helper functions for template-rendering engines: date formatting, HTML
//! escaping, verbatim markers, dictionaries, query strings, splitting and
//! bounded loops.
//!
//! A template engine looks helpers up by name in a [`FuncMap`] and calls
//! them with dynamically-typed [`Value`] arguments. Each helper coerces its
//! inputs, delegates to a string/time/URL/HTML primitive, and returns either
//! a `Value` or an [`Error`] for the engine to surface.
//!
//! ## Architecture
//!
//! - **Values**: [`Value`], the tagged union templates exchange with helpers
//! - **Coercion**: [`cast`], value → string / time / integer
//! - **Layouts**: [`layout`], reference-time date formatting
//! - **Helpers**: [`funcs`], the helpers and the name → function table
//! - **Markers**: [`SafeHtml`] and [`SafeUrl`], opt-outs from auto-escaping
//! - **Configuration**: [`Config`], time zone for dates
//!
//! ## Quick Start
//!
//! ```rust
//! use funcmap_core::{FuncMap, Value};
//!
//! let funcs = FuncMap::default();
//!
//! let date = funcs.call("dateFormat", &["Jan 2, 2006".into(), "2024-03-09".into()])?;
//! assert_eq!(date, Value::from("Mar 9, 2024"));
//!
//! let parts = funcs.call("split", &["a,b,,c".into(), ",".into()])?;
//! assert_eq!(parts.to_string(), "[a b  c]");
//! # Ok::<(), funcmap_core::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! Helpers are stateless and [`FuncMap`] is immutable once built, so one
//! table can be shared by any number of rendering threads.

/// Value coercion
pub mod cast;
/// Configuration loading
pub mod config;
/// Error types and result aliases
pub mod error;
/// Helper implementations and the function table
pub mod funcs;
/// Reference-time layout formatting
pub mod layout;
/// Verbatim markers and auto-escaping
pub mod safe;
/// Dynamically-typed values
pub mod value;

pub use config::{Config, TimeConfig, TimeZone};
pub use error::{Error, Result};
pub use funcs::{FuncMap, HelperFn, global};
pub use safe::{SafeHtml, SafeUrl, escape_html};
pub use value::{Dict, Value};
