//! # jsontree-core
//!
//! A bridge between an untyped JSON tree and statically typed Rust values,
//! driven by each type's own description of its fields rather than by a
//! schema.
//!
//! Two halves:
//!
//! - **Navigation**: [`Node`] walks a [`Value`] tree without ever failing,
//!   tracks the [`Path`] it took, and coerces leaves leniently (`"20"` reads
//!   as the integer `20`).
//! - **Typed decode/encode**: types implement [`Decode`] / [`Encode`] by
//!   driving keyed, sequence or single-value containers. Structural faults
//!   are handled per kind by a [`WrongStructureStrategy`] and every error
//!   carries the path where it happened.
//!
//! ## Quick start
//!
//! ```rust
//! use jsontree_core::{Decode, Decoder, Encode, Encoder, Node, Result};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Decode for User {
//!     fn decode(decoder: &Decoder<'_>) -> Result<Self> {
//!         let keyed = decoder.keyed()?;
//!         Ok(User {
//!             name: keyed.decode("name")?,
//!             age: keyed.decode("age")?,
//!         })
//!     }
//! }
//!
//! impl Encode for User {
//!     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
//!         let mut keyed = encoder.keyed()?;
//!         keyed.encode("name", &self.name)?;
//!         keyed.encode("age", &self.age)
//!     }
//! }
//!
//! let doc = Node::parse(r#"{"name":"John","age":"20"}"#).unwrap();
//! assert_eq!(doc.get("age").as_i64(), Some(20));
//!
//! let user: User = doc.decode().unwrap();
//! assert_eq!(user.age, 20);
//!
//! let text = jsontree_core::encoder::to_string(&user).unwrap();
//! assert_eq!(text, r#"{"name":"John","age":20}"#);
//! ```
//!
//! ## Modules
//!
//! - [`node`]: path-tracking navigator with coercing accessors
//! - [`value`]: the tree itself, with distinct absent and null
//! - [`decoder`] / [`encoder`]: the two cores and their containers
//! - [`strategy`]: null, wrong-structure and date policies
//! - [`codec`]: JSON text boundary backed by `serde_json`
//! - [`error`]: path-annotated error type

pub mod codec;
pub mod config;
pub mod date;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod impls;
pub mod node;
pub mod path;
pub mod scalar;
pub mod strategy;
pub mod value;

pub use config::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use decoder::{
    decode, decode_lenient, decode_with, Decode, Decoder, KeyedDecoder, SequenceDecoder,
    SingleDecoder,
};
pub use encoder::{
    encode, encode_with, Encode, Encoder, KeyedEncoder, SequenceEncoder, SingleEncoder,
};
pub use error::{Error, Result};
pub use node::Node;
pub use path::{Path, PathKey};
pub use scalar::Scalar;
pub use strategy::{
    DateDecodingStrategy, DateEncodingStrategy, NullStrategy, Recovery, WrongStructureStrategy,
};
pub use value::{Kind, Value};
