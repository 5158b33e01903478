//! [`Decode`] and [`Encode`] for standard library types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::decoder::{Decode, Decoder};
use crate::encoder::{Encode, Encoder};
use crate::error::Result;
use crate::node::Node;
use crate::scalar::Scalar;
use crate::value::Value;

macro_rules! scalar_codable {
    ($($t:ty),* $(,)?) => {$(
        impl Decode for $t {
            fn decode(decoder: &Decoder<'_>) -> Result<Self> {
                decoder.scalar()
            }
        }

        impl Encode for $t {
            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
                encoder.write(self.clone().into_value())
            }
        }
    )*};
}

scalar_codable!(bool, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.write(Value::String(self.to_string()))
    }
}

/// The unit type reads any value and writes `null`.
impl Decode for () {
    fn decode(_: &Decoder<'_>) -> Result<Self> {
        Ok(())
    }
}

impl Encode for () {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.encode_nil()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }
}

/// Absent and null both decode as `None`.
impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        if !decoder.exists() || decoder.is_null() {
            return Ok(None);
        }
        T::decode(decoder).map(Some)
    }
}

/// `None` is written as an explicit null. Use
/// [`KeyedEncoder::encode_if_present`](crate::KeyedEncoder::encode_if_present)
/// to leave the member out instead.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.encode_nil(),
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let mut sequence = decoder.sequence()?;
        let mut items = Vec::with_capacity(sequence.count().unwrap_or(0));
        while !sequence.is_at_end() {
            items.push(sequence.decode()?);
        }
        Ok(items)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut sequence = encoder.sequence()?;
        for item in self {
            sequence.encode(item)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        keyed
            .all_keys()
            .into_iter()
            .map(|key| {
                let value = keyed.decode(&key)?;
                Ok((key, value))
            })
            .collect()
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed()?;
        for (key, value) in self {
            keyed.encode(key, value)?;
        }
        Ok(())
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        keyed
            .all_keys()
            .into_iter()
            .map(|key| {
                let value = keyed.decode(&key)?;
                Ok((key, value))
            })
            .collect()
    }
}

/// Members are written in key order so the output is deterministic.
impl<T: Encode, S> Encode for HashMap<String, T, S> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let mut keyed = encoder.keyed()?;
        for (key, value) in entries {
            keyed.encode(key, value)?;
        }
        Ok(())
    }
}

/// The raw subtree, absent included.
impl Decode for Value {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(decoder.value().clone())
    }
}

impl Encode for Value {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        if self.is_absent() {
            return Ok(());
        }
        encoder.write(self.clone())
    }
}

impl Decode for Node {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(decoder.node())
    }
}

impl Encode for Node {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.value().encode(encoder)
    }
}
