//! Dynamically-typed values exchanged with the template engine.
//!
//! Templates hand helpers arbitrary values. [`Value`] is the tagged union
//! those arguments and results travel in; the [`cast`](crate::cast) module
//! turns a `Value` into the concrete scalar a helper needs.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::layout;
use crate::safe::{SafeHtml, SafeUrl};

/// Key/value mapping produced by the `dict` helper.
///
/// Ordered by key so iteration and display are deterministic.
pub type Dict = BTreeMap<String, Value>;

/// A value passed to or returned from a helper function.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`nil` in template terms).
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Plain text, escaped on output.
    String(String),
    /// A point in time with its UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// HTML fragment emitted verbatim.
    Html(SafeHtml),
    /// URL emitted verbatim.
    Url(SafeUrl),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Key/value mapping.
    Map(Dict),
    /// Data-less element produced by `loop`.
    #[serde(serialize_with = "serialize_empty_map")]
    Unit,
}

fn serialize_empty_map<S: serde::Serializer>(serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    serializer.serialize_map(Some(0))?.end()
}

impl Value {
    /// Stable name of this value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::DateTime(_) => "time",
            Self::Html(_) => "html",
            Self::Url(_) => "url",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Unit => "unit",
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The text of a [`Value::String`], without coercion.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements of a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The entries of a [`Value::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&Dict> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Render a float the way `%v` does: shortest digits, exponent form outside
/// `[1e-4, 1e21)`.
pub(crate) fn format_float(f: f64, exponent_form: bool) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let abs = f.abs();
    if !exponent_form || abs == 0.0 || (1e-4..1e21).contains(&abs) {
        return f.to_string();
    }

    // Rust renders `1e21`; the conventional form is `1e+21` with at least two exponent digits.
    let raw = format!("{f:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(("+", exponent), |rest| ("-", rest));
    format!("{mantissa}e{sign}{digits:0>2}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&format_float(*x, true)),
            Self::String(s) => f.write_str(s),
            Self::DateTime(t) => f.write_str(&layout::format(t, layout::DEFAULT_FORMAT)),
            Self::Html(html) => write!(f, "{html}"),
            Self::Url(url) => write!(f, "{url}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Self::Map(map) => {
                f.write_str("map[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            },
            Self::Unit => f.write_str("{}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self::DateTime(t)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::DateTime(t.fixed_offset())
    }
}

impl From<SafeHtml> for Value {
    fn from(html: SafeHtml) -> Self {
        Self::Html(html)
    }
}

impl From<SafeUrl> for Value {
    fn from(url: SafeUrl) -> Self {
        Self::Url(url)
    }
}

impl From<Dict> for Value {
    fn from(map: Dict) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}
