//! Locations inside a tree, used for diagnostics.
//!
//! A [`Path`] is an ordered list of [`PathKey`] steps from the document root.
//! Paths are never mutated in place: every descent produces a new path equal
//! to the parent path plus one key, so sibling nodes never observe each
//! other's steps.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// One step of a [`Path`]: an object member name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Name(name) => f.write_str(name),
            PathKey::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        PathKey::Name(name.to_string())
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        PathKey::Name(name)
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        PathKey::Index(index)
    }
}

impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathKey::Name(name) => serializer.serialize_str(name),
            PathKey::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// An immutable sequence of [`PathKey`] steps identifying a tree location.
///
/// Displayed as `a.list[5]`; the root path displays as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    keys: Vec<PathKey>,
}

impl Path {
    /// The empty path, pointing at the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path equal to `self` extended by `key`.
    pub fn child(&self, key: impl Into<PathKey>) -> Self {
        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend(self.keys.iter().cloned());
        keys.push(key.into());
        Self { keys }
    }

    pub fn keys(&self) -> &[PathKey] {
        &self.keys
    }

    /// The terminal step, or `None` at the root.
    pub fn last(&self) -> Option<&PathKey> {
        self.keys.last()
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        self.keys.len()
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse a dotted path such as `a.list[5].name` or `a.list.5.name`.
    ///
    /// Bracketed segments and all-digit dotted segments become
    /// [`PathKey::Index`]; everything else becomes [`PathKey::Name`].
    /// An empty string or `$` parses to the root path. Returns `None` for
    /// an empty segment (`a..b`, `a.`) and for an unterminated or
    /// non-numeric bracket.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.strip_prefix('$').unwrap_or(input);
        let input = input.strip_prefix('.').unwrap_or(input);
        let mut keys = Vec::new();
        if input.is_empty() {
            return Some(Self { keys });
        }
        for segment in input.split('.') {
            if segment.is_empty() {
                return None;
            }
            let (name, mut rest) = match segment.find('[') {
                Some(pos) => (&segment[..pos], &segment[pos..]),
                None => (segment, ""),
            };
            if !name.is_empty() {
                match name.parse::<usize>() {
                    Ok(index) if name.bytes().all(|b| b.is_ascii_digit()) => {
                        keys.push(PathKey::Index(index))
                    }
                    _ => keys.push(PathKey::Name(name.to_string())),
                }
            }
            while let Some(stripped) = rest.strip_prefix('[') {
                let end = stripped.find(']')?;
                let index: usize = stripped[..end].parse().ok()?;
                keys.push(PathKey::Index(index));
                rest = &stripped[end + 1..];
            }
            if !rest.is_empty() {
                return None;
            }
        }
        Some(Self { keys })
    }
}

impl From<Vec<PathKey>> for Path {
    fn from(keys: Vec<PathKey>) -> Self {
        Self { keys }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return f.write_str("$");
        }
        for (i, key) in self.keys.iter().enumerate() {
            match key {
                PathKey::Name(name) if i == 0 => f.write_str(name)?,
                PathKey::Name(name) => write!(f, ".{name}")?,
                PathKey::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.keys.len()))?;
        for key in &self.keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}
