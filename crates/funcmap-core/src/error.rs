//! Error types for helper function calls.
//!
//! Every helper returns [`Result<T, Error>`](Result) to the template engine
//! that invoked it. Nothing in this crate retries or logs-and-swallows an
//! error: a failed helper call is terminal for that one template evaluation
//! and the host engine decides how to surface it.
//!
//! ## Error Categories
//!
//! - **Coercion**: a value could not be interpreted as a string, time or integer
//! - **Arity / Key type**: malformed argument lists for `dict` and `querify`
//! - **Calling convention**: unknown helper names, wrong argument counts, or a
//!   non-string value where a helper takes a literal string parameter
//! - **Loop limit**: a `loop` count too large to materialize
//! - **Configuration**: an unreadable or malformed config file
//!
//! ```rust
//! use funcmap_core::{Error, FuncMap, Value};
//!
//! let funcs = FuncMap::default();
//! match funcs.call("dict", &[Value::from("only-a-key")]) {
//!     Err(Error::Arity(count)) => assert_eq!(count, 1),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The error type for helper calls, coercion and configuration loading.
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be interpreted as the scalar type a helper needs.
    ///
    /// `value` is a short rendering of the offending input and `target` names
    /// the type the helper asked for (`"string"`, `"time"`, `"int"`).
    #[error("unable to cast {value} to {target}")]
    Coercion {
        /// Debug rendering of the rejected value.
        value: String,
        /// Name of the requested type.
        target: &'static str,
    },

    /// `dict` or `querify` received an odd number of arguments.
    #[error("invalid dict call: expected an even number of arguments, got {0}")]
    Arity(usize),

    /// A key position in a `dict` argument list held a non-string value.
    #[error("dict keys must be strings: argument {index} is of type {found}")]
    KeyType {
        /// Zero-based position of the offending key.
        index: usize,
        /// Type name of the value found there.
        found: &'static str,
    },

    /// `querify` could not build its key/value mapping.
    ///
    /// The dictionary error that caused it is kept as the source.
    #[error("querify keys must be strings: {0}")]
    Querify(#[source] Box<Error>),

    /// No helper is registered under the requested name.
    #[error("function {0:?} not defined")]
    UnknownFunction(String),

    /// A fixed-arity helper was called with the wrong number of arguments.
    #[error("wrong number of args for {function}: want {expected} got {found}")]
    ArgumentCount {
        /// Registered helper name.
        function: &'static str,
        /// Number of arguments the helper takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A helper parameter that is not coerced received the wrong type.
    #[error("wrong type for argument {index} of {function}: expected {expected}, got {found}")]
    ArgumentType {
        /// Registered helper name.
        function: &'static str,
        /// Zero-based argument position.
        index: usize,
        /// Expected type name.
        expected: &'static str,
        /// Type name actually supplied.
        found: &'static str,
    },

    /// `loop` was asked for more elements than a single call may produce.
    #[error("loop count {requested} exceeds the limit of {limit}")]
    LoopLimit {
        /// Count after integer coercion.
        requested: i64,
        /// Largest accepted count.
        limit: usize,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a coercion error for `value` targeting `target`.
    pub(crate) fn coercion(value: &impl std::fmt::Debug, target: &'static str) -> Self {
        Self::Coercion {
            value: format!("{value:?}"),
            target,
        }
    }

    /// Get the error category as a stable string identifier.
    ///
    /// Useful as a structured logging field or for grouping failures
    /// reported back from rendered templates.
    ///
    /// ```rust
    /// use funcmap_core::Error;
    ///
    /// assert_eq!(Error::Arity(3).category(), "arity");
    /// assert_eq!(Error::Querify(Box::new(Error::Arity(1))).category(), "querify");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Coercion { .. } => "coercion",
            Self::Arity(_) => "arity",
            Self::KeyType { .. } => "key_type",
            Self::Querify(_) => "querify",
            Self::UnknownFunction(_) | Self::ArgumentCount { .. } | Self::ArgumentType { .. } => {
                "call"
            },
            Self::LoopLimit { .. } => "loop_limit",
            Self::Config(_) => "config",
        }
    }

    /// The innermost error in a `Querify` chain, or `self` for other variants.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Querify(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Convenience alias for `std::result::Result<T, funcmap_core::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
