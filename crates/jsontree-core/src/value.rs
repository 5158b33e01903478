//! The untyped tree value.
//!
//! [`Value`] mirrors the JSON data model but adds an explicit
//! [`Value::Absent`] variant: a member or element that is not present at all
//! is different from one that is present and `null`, and decode diagnostics
//! depend on keeping the two apart.
//!
//! Objects are stored as `Vec<(String, Value)>` so insertion order survives a
//! round trip without depending on `IndexMap`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;
use std::fmt;

use crate::path::PathKey;

/// A node of the untyped tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The key or index does not exist.
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, Value)>),
}

/// The tag of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Absent,
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Absent => "absent",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

pub(crate) static ABSENT: Value = Value::Absent;

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Absent => Kind::Absent,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Look up a member by name. `None` unless `self` is an object holding `name`.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up an element by index. `None` unless `self` is an array longer than `index`.
    pub fn element(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Look up a child by [`PathKey`].
    pub fn get(&self, key: &PathKey) -> Option<&Value> {
        match key {
            PathKey::Name(name) => self.member(name),
            PathKey::Index(index) => self.element(*index),
        }
    }

    /// Mutable lookup of a child by [`PathKey`].
    pub fn get_mut(&mut self, key: &PathKey) -> Option<&mut Value> {
        match (self, key) {
            (Value::Object(entries), PathKey::Name(name)) => {
                entries.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
            }
            (Value::Array(items), PathKey::Index(index)) => items.get_mut(*index),
            _ => None,
        }
    }

    /// Number of elements (array) or members (object); zero for leaves.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `value` under `key`.
    ///
    /// A name requires `self` to be an object; writing [`Value::Absent`]
    /// removes the member. An index requires `self` to be an array and must
    /// lie in `0..=len`, where `len` appends. Any other combination is a
    /// structural precondition violation and is reported as `Err(detail)`
    /// for the caller to attach a path to.
    pub(crate) fn splice(&mut self, key: &PathKey, value: Value) -> Result<(), String> {
        match (self, key) {
            (Value::Object(entries), PathKey::Name(name)) => {
                let slot = entries.iter().position(|(k, _)| k == name);
                match (slot, value) {
                    (Some(pos), Value::Absent) => {
                        entries.remove(pos);
                    }
                    (Some(pos), value) => entries[pos].1 = value,
                    (None, Value::Absent) => {}
                    (None, value) => entries.push((name.clone(), value)),
                }
                Ok(())
            }
            (Value::Array(_), PathKey::Index(_)) if value.is_absent() => {
                Err("cannot store an absent value in an array".to_string())
            }
            (Value::Array(items), PathKey::Index(index)) => {
                let len = items.len();
                if *index < len {
                    items[*index] = value;
                    Ok(())
                } else if *index == len {
                    items.push(value);
                    Ok(())
                } else {
                    Err(format!("index {index} out of range 0..={len}"))
                }
            }
            (this, PathKey::Name(name)) => {
                Err(format!("cannot set member '{name}' on {}", this.kind()))
            }
            (this, PathKey::Index(index)) => {
                Err(format!("cannot set element {index} on {}", this.kind()))
            }
        }
    }

    /// Convert to a `serde_json::Value`. Absent members are dropped and an
    /// absent root becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Absent | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .filter(|v| !v.is_absent())
                    .map(Value::to_json)
                    .collect(),
            ),
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .filter(|(_, v)| !v.is_absent())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(None)?;
                for item in items.iter().filter(|v| !v.is_absent()) {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in entries.iter().filter(|(_, v)| !v.is_absent()) {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
