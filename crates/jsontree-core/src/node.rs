//! Safe, path-tracking navigation over an untyped tree.
//!
//! A [`Node`] is an independent copy of a subtree together with the
//! [`Path`] that reached it. Navigation never fails: stepping through a
//! missing member, an out-of-range index or a leaf yields an absent node
//! carrying the extended path, so `doc.get("a").get("b").at(3)` is always
//! safe and only surfaces a problem once a value is actually demanded.
//!
//! Because nodes are copies, writing through a navigated child does not
//! change the node it came from. Use [`Node::set`] or [`Node::set_at`] on
//! the node that should change.

use std::fmt;

use crate::config::DecodeOptions;
use crate::decoder::{self, Decode, Decoder};
use crate::error::{Error, Result};
use crate::path::{Path, PathKey};
use crate::scalar::Scalar;
use crate::strategy::NullStrategy;
use crate::value::Value;

/// A subtree plus its location and the null strategy its value accessors use.
#[derive(Debug, Clone, Default)]
pub struct Node {
    value: Value,
    path: Path,
    null_strategy: NullStrategy,
}

impl Node {
    /// A root node.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_path(value.into(), Path::root())
    }

    pub fn with_path(value: Value, path: Path) -> Self {
        Self {
            value,
            path,
            null_strategy: NullStrategy::default(),
        }
    }

    /// Parse JSON text into a root node.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(crate::codec::parse(text)?))
    }

    /// Replace the null strategy. Nodes navigated from this one inherit it.
    pub fn with_null_strategy(mut self, strategy: NullStrategy) -> Self {
        self.null_strategy = strategy;
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn null_strategy(&self) -> &NullStrategy {
        &self.null_strategy
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Step into `key`, by name or by index.
    pub fn key(&self, key: impl Into<PathKey>) -> Node {
        let key = key.into();
        let value = self.value.get(&key).cloned().unwrap_or(Value::Absent);
        Node {
            value,
            path: self.path.child(key),
            null_strategy: self.null_strategy.clone(),
        }
    }

    /// Step into the member `name`.
    pub fn get(&self, name: &str) -> Node {
        self.key(name)
    }

    /// Step into the element at `index`.
    pub fn at(&self, index: usize) -> Node {
        self.key(index)
    }

    /// Step through every key of `path`, relative to this node.
    pub fn navigate(&self, path: &Path) -> Node {
        path.keys()
            .iter()
            .fold(self.clone(), |node, key| node.key(key.clone()))
    }

    /// False only for a missing key or index.
    pub fn exists(&self) -> bool {
        !self.value.is_absent()
    }

    /// True only for an explicit `null`.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Element or member count; zero for leaves.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    // ------------------------------------------------------------------
    // Optional accessors
    // ------------------------------------------------------------------

    /// Coerce to `T`; `None` when missing, null or not coercible.
    pub fn scalar<T: Scalar>(&self) -> Option<T> {
        T::from_value(&self.value)
    }

    pub fn as_string(&self) -> Option<String> {
        self.scalar()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.scalar()
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.scalar()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.scalar()
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.scalar()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.scalar()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.scalar()
    }

    /// The elements of an array, each carrying its own index path.
    pub fn array(&self) -> Option<Vec<Node>> {
        match &self.value {
            Value::Array(items) => Some((0..items.len()).map(|i| self.at(i)).collect()),
            _ => None,
        }
    }

    /// The members of an object in document order, each carrying its own path.
    pub fn object(&self) -> Option<Vec<(String, Node)>> {
        match &self.value {
            Value::Object(entries) => Some(
                entries
                    .iter()
                    .map(|(k, v)| {
                        let node = Node {
                            value: v.clone(),
                            path: self.path.child(k.as_str()),
                            null_strategy: self.null_strategy.clone(),
                        };
                        (k.clone(), node)
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Member names of an object; empty for anything else.
    pub fn keys(&self) -> Vec<String> {
        match &self.value {
            Value::Object(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
            _ => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Value accessors (apply the null strategy)
    // ------------------------------------------------------------------

    /// Coerce to `T`, falling back on the node's [`NullStrategy`].
    pub fn scalar_value<T: Scalar>(&self) -> Result<T> {
        if let Some(v) = self.scalar() {
            return Ok(v);
        }
        match &self.null_strategy {
            NullStrategy::ForceUnwrap => Err(self.unusable::<T>(&self.value)),
            NullStrategy::UseEmptyValue => Ok(T::default()),
            NullStrategy::Custom(replace) => {
                let replacement = replace(self);
                T::from_value(&replacement).ok_or_else(|| self.unusable::<T>(&replacement))
            }
        }
    }

    /// Coerce to `T`, or `default` when that fails.
    pub fn scalar_or<T: Scalar>(&self, default: T) -> T {
        self.scalar().unwrap_or(default)
    }

    pub fn string_value(&self) -> Result<String> {
        self.scalar_value()
    }

    pub fn i64_value(&self) -> Result<i64> {
        self.scalar_value()
    }

    pub fn i32_value(&self) -> Result<i32> {
        self.scalar_value()
    }

    pub fn u64_value(&self) -> Result<u64> {
        self.scalar_value()
    }

    pub fn f32_value(&self) -> Result<f32> {
        self.scalar_value()
    }

    pub fn f64_value(&self) -> Result<f64> {
        self.scalar_value()
    }

    pub fn bool_value(&self) -> Result<bool> {
        self.scalar_value()
    }

    fn unusable<T: Scalar>(&self, value: &Value) -> Error {
        let path = self.path.clone();
        match value {
            Value::Absent => Error::KeyNotFound { path },
            Value::Null => Error::ValueNotFound {
                expected: T::NAME,
                path,
            },
            other => Error::TypeMismatch {
                expected: T::NAME,
                actual: other.kind(),
                path,
            },
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Replace this node's whole value.
    pub fn replace(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Write `value` under `key`.
    ///
    /// A name requires this node to be an object (an absent value removes
    /// the member); an index requires an array and must be at most the
    /// current length, where it appends.
    pub fn set(&mut self, key: impl Into<PathKey>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        self.value
            .splice(&key, value.into())
            .map_err(|detail| Error::invalid_structure(detail, &self.path.child(key)))
    }

    /// Write `value` at `path` relative to this node. Every intermediate
    /// step must already exist; the final step follows [`Node::set`].
    pub fn set_at(&mut self, path: &Path, value: impl Into<Value>) -> Result<()> {
        let Some((last, parents)) = path.keys().split_last() else {
            self.value = value.into();
            return Ok(());
        };
        let mut target = &mut self.value;
        let mut location = self.path.clone();
        for key in parents {
            location = location.child(key.clone());
            target = target
                .get_mut(key)
                .ok_or_else(|| Error::invalid_structure("no container to write through", &location))?;
        }
        target
            .splice(last, value.into())
            .map_err(|detail| Error::invalid_structure(detail, &location.child(last.clone())))
    }

    // ------------------------------------------------------------------
    // Typed decoding
    // ------------------------------------------------------------------

    /// Decode this node as `T`, failing on any structural fault.
    pub fn decode<T: Decode>(&self) -> Result<T> {
        self.decode_with(&DecodeOptions::default())
    }

    pub fn decode_with<T: Decode>(&self, options: &DecodeOptions) -> Result<T> {
        T::decode(&Decoder::with_path(&self.value, self.path.clone(), options))
    }

    /// Decode this node as `T`, substituting zero values for every fault
    /// and returning the faults alongside the value.
    pub fn decode_lenient<T: Decode>(&self, options: &DecodeOptions) -> Result<(T, Vec<Error>)> {
        decoder::decode_lenient_at(&self.value, self.path.clone(), options)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

/// Compact JSON text of the node's value.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::codec::to_string(&self.value))
    }
}
