//! `dict` and `querify`: key/value construction from flat argument lists.

use url::form_urlencoded;

use crate::value::{Dict, Value};
use crate::{Error, Result};

/// Build a mapping from alternating key/value arguments.
///
/// Keys must be strings; a repeated key keeps its last value.
///
/// # Errors
///
/// [`Error::Arity`] for an odd argument count, [`Error::KeyType`] for a
/// non-string key.
///
/// ```rust
/// use funcmap_core::funcs::dict::dictionary;
/// use funcmap_core::Value;
///
/// let dict = dictionary(&["title".into(), "Home".into(), "depth".into(), 2.into()])?;
/// assert_eq!(dict["title"], Value::from("Home"));
/// assert_eq!(dict["depth"], Value::from(2));
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn dictionary(values: &[Value]) -> Result<Dict> {
    if values.len() % 2 != 0 {
        return Err(Error::Arity(values.len()));
    }
    let mut dict = Dict::new();
    for (pair, chunk) in values.chunks_exact(2).enumerate() {
        let (key, value) = (&chunk[0], &chunk[1]);
        let Value::String(key) = key else {
            return Err(Error::KeyType {
                index: pair * 2,
                found: key.type_name(),
            });
        };
        dict.insert(key.clone(), value.clone());
    }
    Ok(dict)
}

/// Encode alternating key/value arguments as a URL query string.
///
/// Values are rendered with their display form and form-urlencoded; pairs
/// are joined with `&` in ascending key order.
///
/// # Errors
///
/// [`Error::Querify`] wrapping the [`dictionary`] error when the arguments
/// do not form a valid mapping.
///
/// ```rust
/// use funcmap_core::funcs::dict::querify;
///
/// let qs = querify(&["q".into(), "rust & go".into(), "page".into(), 2.into()])?;
/// assert_eq!(qs, "page=2&q=rust+%26+go");
/// # Ok::<(), funcmap_core::Error>(())
/// ```
pub fn querify(values: &[Value]) -> Result<String> {
    let dict = dictionary(values).map_err(|e| Error::Querify(Box::new(e)))?;
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &dict {
        query.append_pair(key, &value.to_string());
    }
    Ok(query.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn args(items: &[&str]) -> Vec<Value> {
        items.iter().map(|&s| Value::from(s)).collect()
    }

    #[test]
    fn test_dictionary_pairs() {
        let dict = dictionary(&args(&["a", "1", "b", "2"])).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["a"], Value::from("1"));
    }

    #[test]
    fn test_dictionary_empty() {
        assert!(dictionary(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_dictionary_last_write_wins() {
        let dict = dictionary(&args(&["k", "first", "k", "second"])).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["k"], Value::from("second"));
    }

    #[test]
    fn test_dictionary_keeps_value_types() {
        let dict = dictionary(&[
            "n".into(),
            Value::from(1.5),
            "nested".into(),
            Value::from(vec![Value::Null]),
        ])
        .unwrap();
        assert_eq!(dict["n"], Value::Float(1.5));
        assert_eq!(dict["nested"], Value::List(vec![Value::Null]));
    }

    #[test]
    fn test_dictionary_odd_count() {
        let err = dictionary(&args(&["a", "1", "b"])).unwrap_err();
        assert!(matches!(err, Error::Arity(3)));
    }

    #[test]
    fn test_dictionary_non_string_key() {
        let err = dictionary(&["a".into(), 1.into(), 2.into(), "b".into()]).unwrap_err();
        assert!(matches!(
            err,
            Error::KeyType {
                index: 2,
                found: "int"
            }
        ));
    }

    #[test]
    fn test_querify_sorts_keys() {
        assert_eq!(querify(&args(&["b", "2", "a", "1"])).unwrap(), "a=1&b=2");
    }

    #[test]
    fn test_querify_encodes_reserved_characters() {
        let qs = querify(&args(&["redirect", "/a b?c=d&e", "x y", "é"])).unwrap();
        assert_eq!(qs, "redirect=%2Fa+b%3Fc%3Dd%26e&x+y=%C3%A9");
    }

    #[test]
    fn test_querify_stringifies_values() {
        let qs = querify(&[
            "b".into(),
            true.into(),
            "f".into(),
            2.5.into(),
            "n".into(),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(qs, "b=true&f=2.5&n=%3Cnil%3E");
    }

    #[test]
    fn test_querify_empty() {
        assert_eq!(querify(&[]).unwrap(), "");
    }

    #[test]
    fn test_querify_form_encoding_of_tilde_and_star() {
        // form encoding: `~` is escaped, `*` passes through
        assert_eq!(querify(&args(&["k", "a~b*c"])).unwrap(), "k=a%7Eb*c");
    }

    #[test]
    fn test_querify_wraps_dictionary_errors() {
        let err = querify(&args(&["lonely"])).unwrap_err();
        assert!(matches!(err.root_cause(), Error::Arity(1)));

        let err = querify(&[Value::from(1), Value::from(2)]).unwrap_err();
        assert_eq!(err.category(), "querify");
        assert!(matches!(err.root_cause(), Error::KeyType { index: 0, .. }));
    }

    proptest! {
        #[test]
        fn test_dictionary_entry_count(pairs in proptest::collection::vec(("[a-z]{1,4}", any::<i64>()), 0..32)) {
            let values: Vec<Value> = pairs
                .iter()
                .flat_map(|(k, v)| [Value::from(k.as_str()), Value::from(*v)])
                .collect();
            let distinct: std::collections::BTreeSet<_> = pairs.iter().map(|(k, _)| k).collect();

            let dict = dictionary(&values).unwrap();
            prop_assert_eq!(dict.len(), distinct.len());
            prop_assert!(dict.len() <= values.len() / 2);
        }

        #[test]
        fn test_dictionary_odd_always_fails(values in proptest::collection::vec(any::<i64>(), 0..32)) {
            let mut args: Vec<Value> = values.into_iter().map(Value::from).collect();
            if args.len() % 2 == 0 {
                args.push(Value::Null);
            }
            let is_arity = matches!(dictionary(&args), Err(Error::Arity(_)));
            prop_assert!(is_arity);
        }

        #[test]
        fn test_dictionary_non_string_key_always_fails(pairs in 1usize..16, bad in 0usize..16) {
            let bad = bad % pairs;
            let mut args = Vec::new();
            for i in 0..pairs {
                let key = if i == bad { Value::from(i64::try_from(i).unwrap()) } else { Value::from(format!("k{i}")) };
                args.push(key);
                args.push(Value::Null);
            }
            let err = dictionary(&args).unwrap_err();
            let is_key_type = matches!(err, Error::KeyType { index, .. } if index == bad * 2);
            prop_assert!(is_key_type);
        }
    }
}
