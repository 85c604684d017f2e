//! `htmlEscape`, `htmlUnescape`, `safeHTML` and `safeURL`.
//!
//! Escaping and unescaping are intentionally asymmetric: escaping touches
//! only `< > & ' "`, while unescaping decodes every named, decimal and
//! hexadecimal entity. `unescape(escape(s)) == s` always holds; the reverse
//! does not.
//!
//! Output that is not wrapped by `safeHTML` is escaped again by the rendering
//! layer, so unescaped text usually needs to pass through `safeHTML` too.

use html_escape::decode_html_entities;

use crate::safe::{SafeHtml, SafeUrl, escape_html};
use crate::value::Value;
use crate::{Result, cast};

/// Coerce `value` to text and escape `< > & ' "`.
pub fn escape(value: &Value) -> Result<String> {
    cast::to_string(value).map(|text| escape_html(&text))
}

/// Coerce `value` to text and decode all HTML entities.
pub fn unescape(value: &Value) -> Result<String> {
    cast::to_string(value).map(|text| decode_html_entities(&text).into_owned())
}

/// Coerce `value` to text and mark it as trusted HTML.
pub fn safe_html(value: &Value) -> Result<SafeHtml> {
    cast::to_string(value).map(SafeHtml::new)
}

/// Coerce `value` to text and mark it as a trusted URL.
pub fn safe_url(value: &Value) -> Result<SafeUrl> {
    cast::to_string(value).map(SafeUrl::new)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_reserved() {
        let out = escape(&Value::from("<script>alert('x') && \"y\"</script>")).unwrap();
        assert!(out.starts_with("&lt;script&gt;alert("));
        assert!(out.contains("&amp;&amp;"));
        assert!(!out.contains(['<', '>', '\'', '"']));
    }

    #[test]
    fn test_escape_coerces_scalars() {
        assert_eq!(escape(&Value::from(42)).unwrap(), "42");
        assert!(escape(&Value::from(vec![1])).is_err());
    }

    #[test]
    fn test_unescape_named_numeric_and_legacy() {
        let out = unescape(&Value::from("&lt;p&gt;caf&eacute; &#65;&#x42; &amp;amp;")).unwrap();
        assert_eq!(out, "<p>café AB &amp;");
    }

    #[test]
    fn test_unescape_leaves_plain_text() {
        assert_eq!(unescape(&Value::from("a & b")).unwrap(), "a & b");
    }

    #[test]
    fn test_safe_markers_do_not_transform() {
        let html = safe_html(&Value::from("<b>x</b>")).unwrap();
        assert_eq!(html.as_str(), "<b>x</b>");

        let url = safe_url(&Value::from("javascript:void(0)")).unwrap();
        assert_eq!(url.as_str(), "javascript:void(0)");

        assert!(safe_html(&Value::Unit).is_err());
        assert!(safe_url(&Value::from(vec!["a"])).is_err());
    }

    proptest! {
        #[test]
        fn test_unescape_inverts_escape_for_reserved(s in r#"[<>&'"]{0,64}"#) {
            let escaped = escape(&Value::from(s.as_str())).unwrap();
            prop_assert_eq!(unescape(&Value::from(escaped)).unwrap(), s);
        }

        #[test]
        fn test_unescape_inverts_escape(s in r"\PC{0,128}") {
            let escaped = escape(&Value::from(s.as_str())).unwrap();
            prop_assert_eq!(unescape(&Value::from(escaped)).unwrap(), s);
        }
    }
}
