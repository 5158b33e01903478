//! Encoder core. Builds a [`Value`] tree from statically typed values.
//!
//! The shape mirrors the decoder: a type implements [`Encode`] and writes its
//! fields through a [`KeyedEncoder`], a [`SequenceEncoder`] or a
//! [`SingleEncoder`]. Each field write creates a child encoder scoped to
//! `node[key]` with the path extended by `key`.
//!
//! # Upward propagation
//!
//! Every encoder owns an independent copy of its node. A write to that copy
//! is spliced into the parent's copy at the child's key, and the parent
//! forwards the same change, now addressed by its own key plus the child's,
//! to *its* parent, up to the root encoder, which has no parent and ends the
//! chain. Only the written value travels upward, so a write costs time
//! proportional to its depth, not to the size of the enclosing containers.
//! Encoding a composite first tags its node as an object or array so the
//! splices below it have a container to land in.
//!
//! Parents are reached through `&mut dyn Sink` links. The borrow checker
//! keeps exactly one encoder of a chain writable at a time, so writes are
//! strictly ordered child-then-parent and never interleave.

use tracing::{trace, warn};

use crate::config::EncodeOptions;
use crate::error::{Error, Result};
use crate::path::{Path, PathKey};
use crate::value::Value;

/// A type that can write itself into an [`Encoder`].
pub trait Encode {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;
}

/// Receiver of a change made below its node.
trait Sink {
    /// Store `value` at the relative location `rel` (over the whole node when
    /// `rel` is empty) and forward the change further up.
    fn splice(&mut self, rel: &[PathKey], value: &Value) -> Result<()>;
}

/// Non-owning link from a child encoder to its parent.
struct Link<'p> {
    parent: &'p mut (dyn Sink + 'p),
    /// `None` for a container view over the parent's own node.
    key: Option<PathKey>,
}

/// An encode position: a copy of one node, its path, and a link to the
/// encoder that owns the enclosing node.
pub struct Encoder<'p> {
    value: Value,
    path: Path,
    options: &'p EncodeOptions,
    link: Option<Link<'p>>,
}

impl<'p> Encoder<'p> {
    /// A root encoder over an empty (absent) node.
    pub fn new(options: &'p EncodeOptions) -> Self {
        Self {
            value: Value::Absent,
            path: Path::root(),
            options,
            link: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node as built so far.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn options(&self) -> &'p EncodeOptions {
        self.options
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// A custom error located at this encoder's path.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::Custom {
            message: message.into(),
            path: self.path.clone(),
        }
    }

    /// Replace the node and propagate the change to the root.
    pub fn write(&mut self, value: Value) -> Result<()> {
        self.value = value;
        propagate(&mut self.link, &self.path, &[], &self.value)
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.write(Value::Null)
    }

    /// Encode `value` into this node.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Write this node as an object.
    pub fn keyed(&mut self) -> Result<KeyedEncoder<'_>> {
        self.view().into_keyed()
    }

    /// Write this node as an array; elements are appended after any
    /// already present.
    pub fn sequence(&mut self) -> Result<SequenceEncoder<'_>> {
        self.view().into_sequence()
    }

    /// Write this node as one value.
    pub fn single(&mut self) -> SingleEncoder<'_> {
        SingleEncoder {
            encoder: self.view(),
        }
    }

    fn into_keyed(mut self) -> Result<KeyedEncoder<'p>> {
        if !matches!(self.value, Value::Object(_)) {
            self.write(Value::object())?;
        }
        Ok(KeyedEncoder { encoder: self })
    }

    fn into_sequence(mut self) -> Result<SequenceEncoder<'p>> {
        if !matches!(self.value, Value::Array(_)) {
            self.write(Value::array())?;
        }
        Ok(SequenceEncoder { encoder: self })
    }

    /// An encoder over this same node whose writes land here.
    fn view(&mut self) -> Encoder<'_> {
        let value = self.value.clone();
        let path = self.path.clone();
        let options = self.options;
        Encoder {
            value,
            path,
            options,
            link: Some(Link {
                parent: self,
                key: None,
            }),
        }
    }

    /// An encoder for `node[key]` whose writes are spliced back here.
    fn child(&mut self, key: PathKey) -> Result<Encoder<'_>> {
        let path = self.path.child(key.clone());
        if path.depth() > self.options.max_depth {
            warn!(%path, limit = self.options.max_depth, "encode depth limit exceeded");
            return Err(Error::DepthLimit {
                limit: self.options.max_depth,
                path,
            });
        }
        let value = self.value.get(&key).cloned().unwrap_or(Value::Absent);
        let options = self.options;
        Ok(Encoder {
            value,
            path,
            options,
            link: Some(Link {
                parent: self,
                key: Some(key),
            }),
        })
    }
}

/// Hand a change at `rel` below the node at `path` to the parent, prefixed
/// with the node's own key.
fn propagate(
    link: &mut Option<Link<'_>>,
    path: &Path,
    rel: &[PathKey],
    value: &Value,
) -> Result<()> {
    let Some(link) = link.as_mut() else {
        return Ok(());
    };
    trace!(%path, depth = rel.len(), "propagating write to parent");
    match &link.key {
        Some(key) => {
            let mut scoped = Vec::with_capacity(rel.len() + 1);
            scoped.push(key.clone());
            scoped.extend_from_slice(rel);
            link.parent.splice(&scoped, value)
        }
        None => link.parent.splice(rel, value),
    }
}

impl Sink for Encoder<'_> {
    fn splice(&mut self, rel: &[PathKey], value: &Value) -> Result<()> {
        match rel.split_last() {
            None => self.value = value.clone(),
            Some((last, parents)) => {
                let located = |keys: &[PathKey]| {
                    Path::from(self.path.keys().iter().chain(keys).cloned().collect::<Vec<_>>())
                };
                let mut target = &mut self.value;
                for (depth, key) in parents.iter().enumerate() {
                    target = target.get_mut(key).ok_or_else(|| {
                        let at = located(&parents[..=depth]);
                        Error::invalid_structure("no container to write through", &at)
                    })?;
                }
                target
                    .splice(last, value.clone())
                    .map_err(|detail| Error::invalid_structure(detail, &located(rel)))?;
            }
        }
        propagate(&mut self.link, &self.path, rel, value)
    }
}

/// Object writes by member name.
pub struct KeyedEncoder<'a> {
    encoder: Encoder<'a>,
}

impl<'a> KeyedEncoder<'a> {
    pub fn path(&self) -> &Path {
        self.encoder.path()
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let mut child = self.encoder.child(PathKey::from(key))?;
        value.encode(&mut child)
    }

    pub fn encode_nil(&mut self, key: &str) -> Result<()> {
        self.encoder.child(PathKey::from(key))?.encode_nil()
    }

    /// Write `value` when it is `Some`; leave the member out otherwise.
    pub fn encode_if_present<T: Encode>(&mut self, key: &str, value: &Option<T>) -> Result<()> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    pub fn nested_keyed(&mut self, key: &str) -> Result<KeyedEncoder<'_>> {
        self.encoder.child(PathKey::from(key))?.into_keyed()
    }

    pub fn nested_sequence(&mut self, key: &str) -> Result<SequenceEncoder<'_>> {
        self.encoder.child(PathKey::from(key))?.into_sequence()
    }

    /// The encoder behind this container.
    pub fn super_encoder(&mut self) -> &mut Encoder<'a> {
        &mut self.encoder
    }
}

/// Array writes through an appending cursor.
///
/// The cursor is the array's length, so every element lands in the next
/// free slot. An element that writes nothing is stored as `null`, keeping
/// one slot per encoded element.
pub struct SequenceEncoder<'a> {
    encoder: Encoder<'a>,
}

impl<'a> SequenceEncoder<'a> {
    pub fn path(&self) -> &Path {
        self.encoder.path()
    }

    /// Number of elements written so far.
    pub fn count(&self) -> usize {
        self.encoder.value.len()
    }

    /// Index the next element will be written at.
    pub fn current_index(&self) -> usize {
        self.encoder.value.len()
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let index = self.current_index();
        let mut child = self.step()?;
        value.encode(&mut child)?;
        if self.current_index() == index {
            self.step()?.encode_nil()?;
        }
        Ok(())
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.step()?.encode_nil()
    }

    pub fn nested_keyed(&mut self) -> Result<KeyedEncoder<'_>> {
        self.step()?.into_keyed()
    }

    pub fn nested_sequence(&mut self) -> Result<SequenceEncoder<'_>> {
        self.step()?.into_sequence()
    }

    pub fn super_encoder(&mut self) -> &mut Encoder<'a> {
        &mut self.encoder
    }

    fn step(&mut self) -> Result<Encoder<'_>> {
        let index = self.current_index();
        self.encoder.child(PathKey::Index(index))
    }
}

/// The node itself, written as one value.
pub struct SingleEncoder<'a> {
    encoder: Encoder<'a>,
}

impl SingleEncoder<'_> {
    pub fn path(&self) -> &Path {
        self.encoder.path()
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.encoder.encode_nil()
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(&mut self.encoder)
    }
}

/// Encode `value` into a fresh tree with default options.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Value> {
    encode_with(value, &EncodeOptions::default())
}

/// Encode `value` into a fresh tree with the given options.
pub fn encode_with<T: Encode + ?Sized>(value: &T, options: &EncodeOptions) -> Result<Value> {
    let mut encoder = Encoder::new(options);
    value.encode(&mut encoder)?;
    Ok(encoder.into_value())
}

/// Encode `value` and serialize the tree as compact JSON text.
pub fn to_string<T: Encode + ?Sized>(value: &T) -> Result<String> {
    Ok(crate::codec::to_string(&encode(value)?))
}
