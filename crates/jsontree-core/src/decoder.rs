//! Decoder core. Reads statically typed values out of a [`Value`] tree.
//!
//! A type describes its own shape by implementing [`Decode`]: given a
//! [`Decoder`] positioned at its node, it asks for one of three containers
//! and pulls its fields out one at a time.
//!
//! - [`KeyedDecoder`]: object members by name
//! - [`SequenceDecoder`]: array elements through a monotonic cursor
//! - [`SingleDecoder`]: the node itself as one value
//!
//! Every field read creates a child decoder scoped to `node[key]` whose path
//! is the parent path plus that key, so every error names its location.
//!
//! # Key design decisions
//!
//! - **Borrowed tree**: decoders hold `&Value`; a missing key or index points
//!   at a shared [`Value::Absent`] so navigation never fails by itself.
//! - **Non-owning parent link**: each child borrows its parent decoder. The
//!   link only serves [`Decoder::super_decoder`] and never owns anything.
//! - **Local recovery**: a `UseDefault` or `Report` fault substitutes the
//!   zero value for that one field. A faulty *container* yields a defaulted
//!   decoder whose every read is silently zero, so a missing nested object
//!   is reported once rather than once per member.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::path::{Path, PathKey};
use crate::scalar::Scalar;
use crate::strategy::{Recovery, WrongStructureStrategy};
use crate::value::{Kind, Value, ABSENT};

/// A type that can rebuild itself from a [`Decoder`].
pub trait Decode: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self>;
}

/// A decode position: one node of the tree plus the path that reached it.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    value: &'a Value,
    path: Path,
    options: &'a DecodeOptions,
    parent: Option<&'a Decoder<'a>>,
    defaulted: bool,
}

impl<'a> Decoder<'a> {
    /// A root decoder over `value`.
    pub fn new(value: &'a Value, options: &'a DecodeOptions) -> Self {
        Self::with_path(value, Path::root(), options)
    }

    /// A root decoder over a subtree that already sits at `path`.
    pub fn with_path(value: &'a Value, path: Path, options: &'a DecodeOptions) -> Self {
        Self {
            value,
            path,
            options,
            parent: None,
            defaulted: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn options(&self) -> &'a DecodeOptions {
        self.options
    }

    /// An independent navigator over this decoder's node.
    pub fn node(&self) -> Node {
        Node::with_path(self.value.clone(), self.path.clone())
    }

    pub fn exists(&self) -> bool {
        !self.value.is_absent()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// The decoder this one was created from, or `self` at the root.
    pub fn super_decoder(&self) -> &Decoder<'a> {
        self.parent.unwrap_or(self)
    }

    /// Decode the current node as `T`.
    pub fn decode<T: Decode>(&self) -> Result<T> {
        T::decode(self)
    }

    /// A custom error located at this decoder's path.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::Custom {
            message: message.into(),
            path: self.path.clone(),
        }
    }

    /// A `DataCorrupted` error located at this decoder's path.
    pub fn data_corrupted(&self, detail: impl Into<String>) -> Error {
        Error::DataCorrupted {
            detail: detail.into(),
            path: self.path.clone(),
        }
    }

    /// Read the node as an object.
    pub fn keyed(&self) -> Result<KeyedDecoder<'a>> {
        let decoder = self.container(Kind::Object, "object")?;
        Ok(KeyedDecoder { decoder })
    }

    /// Read the node as an array, starting at index 0.
    pub fn sequence(&self) -> Result<SequenceDecoder<'a>> {
        let decoder = self.container(Kind::Array, "array")?;
        Ok(SequenceDecoder {
            decoder,
            current_index: 0,
        })
    }

    /// Read the node as a single value.
    pub fn single(&self) -> SingleDecoder<'a> {
        SingleDecoder {
            decoder: self.clone(),
        }
    }

    /// Coerce the node to a scalar, applying the wrong-structure strategy
    /// when it is absent, null or of the wrong type.
    pub fn scalar<T: Scalar>(&self) -> Result<T> {
        Ok(self.coerce::<T>()?.unwrap_or_default())
    }

    /// Like [`Decoder::scalar`], but `Ok(None)` tells the caller that a
    /// recovering strategy substituted the value.
    pub(crate) fn coerce<T: Scalar>(&self) -> Result<Option<T>> {
        if self.defaulted {
            return Ok(None);
        }
        let strategy = &self.options.wrong_structure;
        match self.value {
            Value::Absent => {
                self.recover(&strategy.key_not_found, || Error::KeyNotFound {
                    path: self.path.clone(),
                })?;
                Ok(None)
            }
            Value::Null => {
                self.recover(&strategy.value_not_found, || Error::ValueNotFound {
                    expected: T::NAME,
                    path: self.path.clone(),
                })?;
                Ok(None)
            }
            value => match T::from_value(value) {
                Some(v) => Ok(Some(v)),
                None => {
                    self.recover(&strategy.type_mismatch, || Error::TypeMismatch {
                        expected: T::NAME,
                        actual: value.kind(),
                        path: self.path.clone(),
                    })?;
                    Ok(None)
                }
            },
        }
    }

    /// Apply one recovery policy. Only `Throw` escapes.
    fn recover(&self, policy: &Recovery, error: impl FnOnce() -> Error) -> Result<()> {
        match policy {
            Recovery::Throw => Err(error()),
            Recovery::UseDefault => {
                debug!(path = %self.path, "substituting zero value");
                Ok(())
            }
            Recovery::Report(report) => {
                let error = error();
                debug!(path = %self.path, %error, "reporting and substituting zero value");
                report(self, &error);
                Ok(())
            }
        }
    }

    fn container(&self, expected: Kind, name: &'static str) -> Result<Decoder<'a>> {
        if self.defaulted || self.value.kind() == expected {
            return Ok(self.clone());
        }
        let strategy = &self.options.wrong_structure;
        match self.value {
            Value::Absent => self.recover(&strategy.key_not_found, || Error::KeyNotFound {
                path: self.path.clone(),
            })?,
            Value::Null => self.recover(&strategy.value_not_found, || Error::ValueNotFound {
                expected: name,
                path: self.path.clone(),
            })?,
            value => self.recover(&strategy.type_mismatch, || Error::TypeMismatch {
                expected: name,
                actual: value.kind(),
                path: self.path.clone(),
            })?,
        }
        Ok(Decoder {
            value: &ABSENT,
            defaulted: true,
            ..self.clone()
        })
    }

    /// A decoder for `node[key]` whose path is extended by `key`.
    fn child(&self, key: PathKey) -> Result<Decoder<'_>> {
        let path = self.path.child(key);
        if path.depth() > self.options.max_depth {
            warn!(%path, limit = self.options.max_depth, "decode depth limit exceeded");
            return Err(Error::DepthLimit {
                limit: self.options.max_depth,
                path,
            });
        }
        let value = if self.defaulted {
            &ABSENT
        } else {
            path.last()
                .and_then(|key| self.value.get(key))
                .unwrap_or(&ABSENT)
        };
        Ok(Decoder {
            value,
            path,
            options: self.options,
            parent: Some(self),
            defaulted: self.defaulted,
        })
    }
}

/// Object access by member name.
#[derive(Debug, Clone)]
pub struct KeyedDecoder<'a> {
    decoder: Decoder<'a>,
}

impl<'a> KeyedDecoder<'a> {
    pub fn path(&self) -> &Path {
        self.decoder.path()
    }

    pub fn decoder(&self) -> &Decoder<'a> {
        &self.decoder
    }

    /// The member names actually present, in document order.
    pub fn all_keys(&self) -> Vec<String> {
        match self.decoder.value {
            Value::Object(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.decoder.value.member(key).is_some_and(|v| !v.is_absent())
    }

    /// True only when the member is present and explicitly null.
    pub fn is_null(&self, key: &str) -> bool {
        self.decoder.value.member(key).is_some_and(Value::is_null)
    }

    pub fn decode<T: Decode>(&self, key: &str) -> Result<T> {
        let child = self.decoder.child(PathKey::from(key))?;
        T::decode(&child)
    }

    /// `None` when the member is absent or null; otherwise decode it.
    pub fn decode_if_present<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        if !self.contains(key) || self.is_null(key) {
            return Ok(None);
        }
        self.decode(key).map(Some)
    }

    pub fn nested_keyed(&self, key: &str) -> Result<KeyedDecoder<'_>> {
        self.decoder.child(PathKey::from(key))?.keyed()
    }

    pub fn nested_sequence(&self, key: &str) -> Result<SequenceDecoder<'_>> {
        self.decoder.child(PathKey::from(key))?.sequence()
    }

    pub fn super_decoder(&self) -> &Decoder<'a> {
        self.decoder.super_decoder()
    }
}

/// Array access through a cursor that only moves forward.
#[derive(Debug, Clone)]
pub struct SequenceDecoder<'a> {
    decoder: Decoder<'a>,
    current_index: usize,
}

impl<'a> SequenceDecoder<'a> {
    pub fn path(&self) -> &Path {
        self.decoder.path()
    }

    pub fn decoder(&self) -> &Decoder<'a> {
        &self.decoder
    }

    /// Element count, or `None` when the node is not an array.
    pub fn count(&self) -> Option<usize> {
        if self.decoder.defaulted {
            return Some(0);
        }
        match self.decoder.value {
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_at_end(&self) -> bool {
        self.count().is_none_or(|count| self.current_index >= count)
    }

    /// Consume one element, returning whether it was null.
    pub fn decode_nil(&mut self) -> Result<bool> {
        Ok(self.step()?.is_null())
    }

    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        let child = self.step()?;
        T::decode(&child)
    }

    pub fn nested_keyed(&mut self) -> Result<KeyedDecoder<'_>> {
        self.step()?.keyed()
    }

    pub fn nested_sequence(&mut self) -> Result<SequenceDecoder<'_>> {
        self.step()?.sequence()
    }

    pub fn super_decoder(&self) -> &Decoder<'a> {
        self.decoder.super_decoder()
    }

    fn step(&mut self) -> Result<Decoder<'_>> {
        let index = self.current_index;
        self.current_index += 1;
        self.decoder.child(PathKey::Index(index))
    }
}

/// The node itself, read as one value.
#[derive(Debug, Clone)]
pub struct SingleDecoder<'a> {
    decoder: Decoder<'a>,
}

impl<'a> SingleDecoder<'a> {
    pub fn path(&self) -> &Path {
        self.decoder.path()
    }

    pub fn is_null(&self) -> bool {
        self.decoder.is_null()
    }

    pub fn decode<T: Decode>(&self) -> Result<T> {
        T::decode(&self.decoder)
    }
}

/// Decode `value` as `T` with default options (every fault is an error).
pub fn decode<T: Decode>(value: &Value) -> Result<T> {
    decode_with(value, &DecodeOptions::default())
}

/// Decode `value` as `T` with the given options.
pub fn decode_with<T: Decode>(value: &Value, options: &DecodeOptions) -> Result<T> {
    T::decode(&Decoder::new(value, options))
}

/// Decode `value` as `T`, recovering from every structural fault.
///
/// Every fault is recorded and replaced by a zero value; the returned list
/// holds one error per faulty field in the order they were met. The
/// wrong-structure policies in `options` are replaced; dates and depth
/// limit are kept.
pub fn decode_lenient<T: Decode>(value: &Value, options: &DecodeOptions) -> Result<(T, Vec<Error>)> {
    decode_lenient_at(value, Path::root(), options)
}

pub(crate) fn decode_lenient_at<T: Decode>(
    value: &Value,
    path: Path,
    options: &DecodeOptions,
) -> Result<(T, Vec<Error>)> {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let options = options
        .clone()
        .with_wrong_structure(WrongStructureStrategy::report(move |_, error| {
            sink.borrow_mut().push(error.clone());
        }));
    let decoded = T::decode(&Decoder::with_path(value, path, &options))?;
    let errors = errors.take();
    Ok((decoded, errors))
}

/// Parse JSON text and decode it as `T` with default options.
pub fn from_str<T: Decode>(text: &str) -> Result<T> {
    decode(&crate::codec::parse(text)?)
}
