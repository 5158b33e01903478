//! Text boundary: JSON text in, [`Value`] out, and back.
//!
//! Parsing and printing are delegated to `serde_json`; this module only
//! translates between its data model and the tree's.

use crate::error::Result;
use crate::value::Value;

/// Parse JSON text into a tree.
pub fn parse(text: &str) -> Result<Value> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(value))
}

/// Parse JSON bytes into a tree.
pub fn parse_slice(bytes: &[u8]) -> Result<Value> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(Value::from(value))
}

/// Compact JSON text. Absent members are left out; an absent root prints as `null`.
pub fn to_string(value: &Value) -> String {
    value.to_json().to_string()
}

/// Indented JSON text.
pub fn to_string_pretty(value: &Value) -> String {
    format!("{:#}", value.to_json())
}

pub fn to_vec(value: &Value) -> Vec<u8> {
    to_string(value).into_bytes()
}
