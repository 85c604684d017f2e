//! `split` and `loop`.

use crate::value::Value;
use crate::{Error, Result, cast};

/// Largest element count a single `loop` call will produce.
pub const MAX_ITERATIONS: usize = 1 << 20;

/// Coerce `value` to text and split it on every occurrence of `delimiter`.
///
/// Empty pieces are kept, so `"a,,b"` yields three entries and `""` yields a
/// single empty string. An empty delimiter splits between characters.
///
/// ```rust
/// use funcmap_core::funcs::strings::split;
/// use funcmap_core::Value;
///
/// assert_eq!(split(&Value::from("a,b,,c"), ",")?, ["a", "b", "", "c"]);
/// assert_eq!(split(&Value::from(""), ",")?, [""]);
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn split(value: &Value, delimiter: &str) -> Result<Vec<String>> {
    let text = cast::to_string(value)?;
    if delimiter.is_empty() {
        return Ok(text.chars().map(String::from).collect());
    }
    Ok(text.split(delimiter).map(String::from).collect())
}

/// A sequence of `n` data-less elements for templates to range over.
///
/// `n` is coerced with [`cast::to_int`]; zero or negative counts give an
/// empty sequence. Counts above [`MAX_ITERATIONS`], or ones the allocator
/// refuses, fail with [`Error::LoopLimit`].
pub fn iterations(n: &Value) -> Result<Vec<Value>> {
    let requested = cast::to_int(n)?;
    let count = usize::try_from(requested).unwrap_or(0);
    let limit_error = || Error::LoopLimit {
        requested,
        limit: MAX_ITERATIONS,
    };
    if count > MAX_ITERATIONS {
        return Err(limit_error());
    }

    let mut units = Vec::new();
    units.try_reserve_exact(count).map_err(|_| limit_error())?;
    units.resize(count, Value::Unit);
    Ok(units)
}
