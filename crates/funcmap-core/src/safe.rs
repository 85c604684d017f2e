//! Verbatim markers and the auto-escaping output contract.
//!
//! Template output is HTML-escaped by default. [`SafeHtml`] and [`SafeUrl`]
//! are the only opt-out: a rendering layer that sees one of these emits the
//! wrapped text as-is. Template authors reach them through the `safeHTML`
//! and `safeURL` helpers after making sure the content is trusted.

use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// A known-safe HTML fragment, emitted without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

/// A known-safe URL or URL substring, emitted without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SafeUrl(String);

macro_rules! marker_impls {
    ($ty:ident) => {
        impl $ty {
            /// Wrap `text` without modifying it.
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            /// The wrapped text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the owned text.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

marker_impls!(SafeHtml);
marker_impls!(SafeUrl);

/// Escape `< > & ' "` for inclusion in HTML text or quoted attributes.
///
/// Already-escaped input is escaped again: `&amp;` becomes `&amp;amp;`.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

impl Value {
    /// The text a rendering layer should emit for this value.
    ///
    /// Marker values come out verbatim; everything else is rendered with its
    /// [`Display`](fmt::Display) form and HTML-escaped.
    ///
    /// ```rust
    /// use funcmap_core::{SafeHtml, Value};
    ///
    /// assert_eq!(Value::from("<b>").render_escaped(), "&lt;b&gt;");
    /// assert_eq!(Value::from(SafeHtml::new("<b>")).render_escaped(), "<b>");
    /// ```
    pub fn render_escaped(&self) -> String {
        match self {
            Self::Html(html) => html.as_str().to_string(),
            Self::Url(url) => url.as_str().to_string(),
            other => escape_html(&other.to_string()),
        }
    }
}
