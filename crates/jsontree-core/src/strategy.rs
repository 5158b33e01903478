//! Policies consulted by the navigator, the decoder and the encoder.
//!
//! None of these depend on each other; they are plain configuration values
//! that the cores copy into every child they create.

use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::value::Value;

/// What the navigator's non-optional accessors (`string_value`, `int_value`,
/// ...) do when the node holds no usable value.
#[derive(Clone, Default)]
pub enum NullStrategy {
    /// Return an error describing the missing, null or mistyped value.
    #[default]
    ForceUnwrap,
    /// Substitute the type's zero value (`""`, `0`, `0.0`, `false`).
    UseEmptyValue,
    /// Ask the closure for a replacement leaf, which is then coerced to the
    /// requested type. A replacement that does not coerce is a type mismatch.
    Custom(Arc<dyn Fn(&Node) -> Value + Send + Sync>),
}

impl NullStrategy {
    pub fn custom(f: impl Fn(&Node) -> Value + Send + Sync + 'static) -> Self {
        NullStrategy::Custom(Arc::new(f))
    }
}

impl fmt::Debug for NullStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullStrategy::ForceUnwrap => f.write_str("ForceUnwrap"),
            NullStrategy::UseEmptyValue => f.write_str("UseEmptyValue"),
            NullStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Callback invoked by [`Recovery::Report`] with the decoder positioned at
/// the faulty node and the error that would otherwise have been returned.
pub type ReportFn = Rc<dyn Fn(&Decoder<'_>, &Error)>;

/// How the decoder recovers from one kind of structural fault.
#[derive(Clone, Default)]
pub enum Recovery {
    /// Abort the whole decode with the path-annotated error.
    #[default]
    Throw,
    /// Substitute the zero value and keep going.
    UseDefault,
    /// Invoke the callback once, then substitute the zero value.
    Report(ReportFn),
}

impl fmt::Debug for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::Throw => f.write_str("Throw"),
            Recovery::UseDefault => f.write_str("UseDefault"),
            Recovery::Report(_) => f.write_str("Report(..)"),
        }
    }
}

/// One [`Recovery`] per kind of fault the decoder can hit on a leaf or
/// container.
#[derive(Debug, Clone, Default)]
pub struct WrongStructureStrategy {
    /// The key or index is absent.
    pub key_not_found: Recovery,
    /// The key is present but null.
    pub value_not_found: Recovery,
    /// The value does not coerce to the requested type.
    pub type_mismatch: Recovery,
}

impl WrongStructureStrategy {
    /// Fail on every fault.
    pub fn throw() -> Self {
        Self::default()
    }

    /// Substitute zero values for every fault.
    pub fn use_default() -> Self {
        Self {
            key_not_found: Recovery::UseDefault,
            value_not_found: Recovery::UseDefault,
            type_mismatch: Recovery::UseDefault,
        }
    }

    /// Report every fault to `f` and substitute zero values.
    pub fn report(f: impl Fn(&Decoder<'_>, &Error) + 'static) -> Self {
        let f: ReportFn = Rc::new(f);
        Self {
            key_not_found: Recovery::Report(f.clone()),
            value_not_found: Recovery::Report(f.clone()),
            type_mismatch: Recovery::Report(f),
        }
    }
}

/// How dates are read from the tree.
#[derive(Clone, Default)]
pub enum DateDecodingStrategy {
    /// Use the date's own representation: an RFC 3339 string.
    #[default]
    DeferredToDate,
    /// A number of seconds since the Unix epoch (fractions allowed).
    SecondsSince1970,
    /// A number of milliseconds since the Unix epoch.
    MillisecondsSince1970,
    /// An ISO 8601 / RFC 3339 string such as `2018-10-20T12:00:00Z`.
    Iso8601,
    /// A string in the given `strftime` pattern, interpreted as UTC unless
    /// the pattern carries an offset.
    Formatted(String),
    /// Fully delegated to the closure.
    Custom(Rc<dyn Fn(&Decoder<'_>) -> Result<DateTime<Utc>>>),
}

impl DateDecodingStrategy {
    pub fn formatted(pattern: impl Into<String>) -> Self {
        DateDecodingStrategy::Formatted(pattern.into())
    }

    pub fn custom(f: impl Fn(&Decoder<'_>) -> Result<DateTime<Utc>> + 'static) -> Self {
        DateDecodingStrategy::Custom(Rc::new(f))
    }
}

impl fmt::Debug for DateDecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateDecodingStrategy::DeferredToDate => f.write_str("DeferredToDate"),
            DateDecodingStrategy::SecondsSince1970 => f.write_str("SecondsSince1970"),
            DateDecodingStrategy::MillisecondsSince1970 => f.write_str("MillisecondsSince1970"),
            DateDecodingStrategy::Iso8601 => f.write_str("Iso8601"),
            DateDecodingStrategy::Formatted(pattern) => write!(f, "Formatted({pattern:?})"),
            DateDecodingStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How dates are written to the tree. Mirrors [`DateDecodingStrategy`].
#[derive(Clone, Default)]
pub enum DateEncodingStrategy {
    #[default]
    DeferredToDate,
    /// Whole seconds are written as integers, fractional ones as floats.
    SecondsSince1970,
    MillisecondsSince1970,
    /// Written with second precision and a `Z` suffix.
    Iso8601,
    Formatted(String),
    Custom(Rc<dyn Fn(&DateTime<Utc>, &mut Encoder<'_>) -> Result<()>>),
}

impl DateEncodingStrategy {
    pub fn formatted(pattern: impl Into<String>) -> Self {
        DateEncodingStrategy::Formatted(pattern.into())
    }

    pub fn custom(f: impl Fn(&DateTime<Utc>, &mut Encoder<'_>) -> Result<()> + 'static) -> Self {
        DateEncodingStrategy::Custom(Rc::new(f))
    }
}

impl fmt::Debug for DateEncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateEncodingStrategy::DeferredToDate => f.write_str("DeferredToDate"),
            DateEncodingStrategy::SecondsSince1970 => f.write_str("SecondsSince1970"),
            DateEncodingStrategy::MillisecondsSince1970 => f.write_str("MillisecondsSince1970"),
            DateEncodingStrategy::Iso8601 => f.write_str("Iso8601"),
            DateEncodingStrategy::Formatted(pattern) => write!(f, "Formatted({pattern:?})"),
            DateEncodingStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
