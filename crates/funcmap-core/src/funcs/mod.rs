//! The template function table.
//!
//! [`FuncMap`] maps each stable helper name to its implementation. A host
//! template engine builds one at startup (or borrows the process-wide
//! [`global`] table) and consults it whenever a template calls a function.
//!
//! | Name | Arguments | Result |
//! |------|-----------|--------|
//! | `dateFormat` | layout, time or nil | string |
//! | `htmlEscape` | value | string |
//! | `htmlUnescape` | value | string |
//! | `safeHTML` | value | html |
//! | `safeURL` | value | url |
//! | `dict` | key, value, ... | map |
//! | `querify` | key, value, ... | string |
//! | `split` | value, delimiter | list of strings |
//! | `loop` | count | list of unit |
//!
//! Renaming any entry breaks existing templates.
//!
//! ```rust
//! use funcmap_core::{FuncMap, Value};
//!
//! let funcs = FuncMap::default();
//! let qs = funcs.call("querify", &["b".into(), "2".into(), "a".into(), "1".into()])?;
//! assert_eq!(qs, Value::from("a=1&b=2"));
//! # Ok::<(), funcmap_core::Error>(())
//! ```

pub mod date;
pub mod dict;
pub mod html;
pub mod strings;

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::config::Config;
use crate::value::Value;
use crate::{Error, Result};

/// Signature shared by every registered helper.
pub type HelperFn = fn(&Config, &[Value]) -> Result<Value>;

/// `dateFormat`
pub const DATE_FORMAT: &str = "dateFormat";
/// `htmlEscape`
pub const HTML_ESCAPE: &str = "htmlEscape";
/// `htmlUnescape`
pub const HTML_UNESCAPE: &str = "htmlUnescape";
/// `safeHTML`
pub const SAFE_HTML: &str = "safeHTML";
/// `safeURL`
pub const SAFE_URL: &str = "safeURL";
/// `dict`
pub const DICT: &str = "dict";
/// `querify`
pub const QUERIFY: &str = "querify";
/// `split`
pub const SPLIT: &str = "split";
/// `loop`
pub const LOOP: &str = "loop";

const HELPERS: [(&str, HelperFn); 9] = [
    (DATE_FORMAT, call_date_format),
    (HTML_ESCAPE, call_html_escape),
    (HTML_UNESCAPE, call_html_unescape),
    (SAFE_HTML, call_safe_html),
    (SAFE_URL, call_safe_url),
    (DICT, call_dict),
    (QUERIFY, call_querify),
    (SPLIT, call_split),
    (LOOP, call_loop),
];

static GLOBAL: Lazy<FuncMap> = Lazy::new(FuncMap::default);

/// The process-wide table built with the default [`Config`].
///
/// Built on first use and never modified afterwards.
pub fn global() -> &'static FuncMap {
    &GLOBAL
}

/// An immutable name → helper table bound to a [`Config`].
#[derive(Clone)]
pub struct FuncMap {
    config: Config,
    funcs: BTreeMap<&'static str, HelperFn>,
}

impl fmt::Debug for FuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncMap")
            .field("config", &self.config)
            .field("funcs", &self.funcs.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FuncMap {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FuncMap {
    /// Build the table with every helper registered.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            funcs: HELPERS.into_iter().collect(),
        }
    }

    /// The configuration helpers are called with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a helper by name.
    pub fn get(&self, name: &str) -> Option<HelperFn> {
        self.funcs.get(name).copied()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.funcs.keys().copied()
    }

    /// Number of registered helpers.
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Invoke the helper registered as `name`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownFunction`] when nothing is registered under `name`,
    /// otherwise whatever the helper itself returns.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let func = self
            .get(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
        tracing::debug!(function = name, args = args.len(), "calling template helper");
        func(&self.config, args)
    }
}

/// Check a fixed argument count and hand the arguments back as an array.
fn fixed_args<'a, const N: usize>(function: &'static str, args: &'a [Value]) -> Result<&'a [Value; N]> {
    args.try_into().map_err(|_| Error::ArgumentCount {
        function,
        expected: N,
        found: args.len(),
    })
}

/// Require a literal string parameter (no coercion).
fn expect_str<'a>(function: &'static str, index: usize, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or(Error::ArgumentType {
        function,
        index,
        expected: "string",
        found: value.type_name(),
    })
}

fn call_date_format(config: &Config, args: &[Value]) -> Result<Value> {
    let [layout, value] = fixed_args::<2>(DATE_FORMAT, args)?;
    let layout = expect_str(DATE_FORMAT, 0, layout)?;
    date::format_date(layout, value, &config.time.zone).map(Value::from)
}

fn call_html_escape(_: &Config, args: &[Value]) -> Result<Value> {
    let [value] = fixed_args::<1>(HTML_ESCAPE, args)?;
    html::escape(value).map(Value::from)
}

fn call_html_unescape(_: &Config, args: &[Value]) -> Result<Value> {
    let [value] = fixed_args::<1>(HTML_UNESCAPE, args)?;
    html::unescape(value).map(Value::from)
}

fn call_safe_html(_: &Config, args: &[Value]) -> Result<Value> {
    let [value] = fixed_args::<1>(SAFE_HTML, args)?;
    html::safe_html(value).map(Value::from)
}

fn call_safe_url(_: &Config, args: &[Value]) -> Result<Value> {
    let [value] = fixed_args::<1>(SAFE_URL, args)?;
    html::safe_url(value).map(Value::from)
}

fn call_dict(_: &Config, args: &[Value]) -> Result<Value> {
    dict::dictionary(args).map(Value::Map)
}

fn call_querify(_: &Config, args: &[Value]) -> Result<Value> {
    dict::querify(args).map(Value::from)
}

fn call_split(_: &Config, args: &[Value]) -> Result<Value> {
    let [value, delimiter] = fixed_args::<2>(SPLIT, args)?;
    let delimiter = expect_str(SPLIT, 1, delimiter)?;
    strings::split(value, delimiter).map(Value::from)
}

fn call_loop(_: &Config, args: &[Value]) -> Result<Value> {
    let [count] = fixed_args::<1>(LOOP, args)?;
    strings::iterations(count).map(Value::List)
}
