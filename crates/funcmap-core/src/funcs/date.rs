//! `dateFormat`: render a time with a reference layout.

use crate::config::TimeZone;
use crate::value::Value;
use crate::{Result, cast, layout};

/// Format `value` with `layout`, using the current time when `value` is nil.
///
/// Non-nil values are coerced with [`cast::to_time`]; text without an offset
/// and "now" are both resolved in `zone`.
///
/// ```rust
/// use funcmap_core::funcs::date::format_date;
/// use funcmap_core::{TimeZone, Value};
///
/// let out = format_date("Jan 2, 2006", &Value::from("2015-10-21"), &TimeZone::Utc)?;
/// assert_eq!(out, "Oct 21, 2015");
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn format_date(layout: &str, value: &Value, zone: &TimeZone) -> Result<String> {
    let time = if value.is_null() {
        zone.now()
    } else {
        cast::to_time(value, zone)?
    };
    Ok(layout::format(&time, layout))
}
