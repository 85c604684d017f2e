//! Coercion of dynamically-typed [`Value`]s into concrete scalars.
//!
//! Each function is total: it either produces the requested type or returns
//! [`Error::Coercion`]. Coercion is deliberately lenient about scalars (a
//! number coerces to a string, a string to a time) and strict about
//! containers (a list never coerces to a string).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::config::TimeZone;
use crate::value::{Value, format_float};
use crate::{Error, Result};

/// How a string matched by one of [`TIME_FORMATS`] is turned into an instant.
#[derive(Debug, Clone, Copy)]
enum Resolve {
    /// The text carries a numeric offset.
    Offset,
    /// The text carries a zone abbreviation, which cannot be resolved to an
    /// offset and is read as UTC.
    Abbreviation,
    /// No zone information: interpreted in the configured zone.
    Naive,
    /// A calendar date: midnight in the configured zone.
    Date,
    /// No year (or no date at all): the text is prefixed with the given
    /// year-zero fragment and then read in the configured zone.
    YearZero(&'static str),
}

/// Recognized textual time formats, tried in order after RFC 3339 and RFC 2822.
const TIME_FORMATS: &[(&str, Resolve)] = &[
    ("%Y-%m-%dT%H:%M:%S%.f", Resolve::Naive),
    ("%a, %d %b %Y %H:%M:%S %Z", Resolve::Abbreviation),
    ("%d %b %y %H:%M %z", Resolve::Offset),
    ("%d %b %y %H:%M %Z", Resolve::Abbreviation),
    ("%A, %d-%b-%y %H:%M:%S %Z", Resolve::Abbreviation),
    ("%a %b %e %H:%M:%S %Y", Resolve::Naive),
    ("%a %b %d %H:%M:%S %z %Y", Resolve::Offset),
    ("%a %b %e %H:%M:%S %Z %Y", Resolve::Abbreviation),
    ("%Y-%m-%d %H:%M:%S%.f %z %Z", Resolve::Offset),
    ("%Y-%m-%d", Resolve::Date),
    ("%d %b %Y", Resolve::Date),
    ("%Y-%m-%dT%H:%M:%S%.f%z", Resolve::Offset),
    ("%Y-%m-%d %H:%M:%S%.f %:z", Resolve::Offset),
    ("%Y-%m-%d %H:%M:%S%.f %z", Resolve::Offset),
    ("%Y-%m-%d %H:%M:%S%.f%:z", Resolve::Offset),
    ("%Y-%m-%d %H:%M:%S%.fZ", Resolve::Abbreviation),
    ("%Y-%m-%d %H:%M:%S%.f", Resolve::Naive),
    ("%Y-%m-%d %I:%M%p", Resolve::YearZero("0000-01-01 ")),
    ("%Y %b %e %H:%M:%S%.f", Resolve::YearZero("0000 ")),
];

/// Coerce a value to text.
///
/// Strings, booleans, numbers, times and verbatim markers convert; `nil`
/// becomes the empty string. Lists, maps and unit values are rejected.
///
/// ```rust
/// use funcmap_core::{cast, Value};
///
/// assert_eq!(cast::to_string(&Value::from(2.50))?, "2.5");
/// assert_eq!(cast::to_string(&Value::Null)?, "");
/// assert!(cast::to_string(&Value::from(vec![1, 2])).is_err());
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format_float(*f, false)),
        Value::Html(html) => Ok(html.as_str().to_string()),
        Value::Url(url) => Ok(url.as_str().to_string()),
        Value::DateTime(_) => Ok(value.to_string()),
        Value::List(_) | Value::Map(_) | Value::Unit => Err(Error::coercion(value, "string")),
    }
}

/// Coerce a value to a point in time.
///
/// - times pass through unchanged
/// - integers are Unix seconds, floats Unix seconds with a fraction
/// - strings are matched against RFC 3339, RFC 2822 and a list of common
///   layouts; text without an offset is read in `zone`
///
/// ```rust
/// use funcmap_core::{cast, TimeZone, Value};
///
/// let t = cast::to_time(&Value::from("2024-02-29 13:45:00"), &TimeZone::Utc)?;
/// assert_eq!(t.to_rfc3339(), "2024-02-29T13:45:00+00:00");
/// assert!(cast::to_time(&Value::from("not-a-date"), &TimeZone::Utc).is_err());
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn to_time(value: &Value, zone: &TimeZone) -> Result<DateTime<FixedOffset>> {
    let parsed = match value {
        Value::DateTime(t) => Some(*t),
        Value::Int(secs) => DateTime::from_timestamp(*secs, 0).map(|t| zone.convert(&t)),
        Value::Float(secs) => float_timestamp(*secs).map(|t| zone.convert(&t)),
        Value::String(s) => parse_time(s, zone),
        _ => None,
    };
    parsed.ok_or_else(|| {
        tracing::trace!(kind = value.type_name(), "value is not a recognizable time");
        Error::coercion(value, "time")
    })
}

/// Coerce a value to an integer.
///
/// Floats are truncated toward zero, booleans become 1 or 0, `nil` is 0 and
/// strings must hold a decimal integer.
pub fn to_int(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        #[allow(clippy::cast_possible_truncation)] // Documented: truncates toward zero
        Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        Value::String(s) => s.parse().map_err(|_| Error::coercion(value, "int")),
        _ => Err(Error::coercion(value, "int")),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_timestamp(secs: f64) -> Option<DateTime<chrono::Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn parse_time(s: &str, zone: &TimeZone) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(s) {
        return Some(t);
    }
    TIME_FORMATS
        .iter()
        .find_map(|&(format, resolve)| parse_with(s, format, resolve, zone))
}

fn parse_with(
    s: &str,
    format: &str,
    resolve: Resolve,
    zone: &TimeZone,
) -> Option<DateTime<FixedOffset>> {
    match resolve {
        Resolve::Offset => DateTime::parse_from_str(s, format).ok(),
        Resolve::Abbreviation => NaiveDateTime::parse_from_str(s, format)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset()),
        Resolve::Naive => NaiveDateTime::parse_from_str(s, format)
            .ok()
            .and_then(|naive| zone.from_naive(&naive)),
        Resolve::Date => NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| zone.from_naive(&naive)),
        Resolve::YearZero(prefix) => NaiveDateTime::parse_from_str(&format!("{prefix}{s}"), format)
            .ok()
            .and_then(|naive| zone.from_naive(&naive)),
    }
}
