//! Error types for tree navigation, decoding and encoding.
//!
//! Every variant produced below the codec boundary carries the [`Path`] at
//! the point of failure, so a caller can tell *where* in the document a
//! field went wrong and not only *what* went wrong.

use crate::path::Path;
use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur while navigating, decoding or encoding a tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The key or index is not present in its parent container.
    #[error("key not found at {path}")]
    KeyNotFound { path: Path },

    /// The key is present but its value is an explicit `null`.
    #[error("expected {expected}, found null at {path}")]
    ValueNotFound { expected: &'static str, path: Path },

    /// The value is present but cannot be coerced to the requested type.
    #[error("type mismatch at {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: Kind,
        path: Path,
    },

    /// The value has the right shape but its content is malformed
    /// (e.g. an unparseable date string).
    #[error("data corrupted at {path}: {detail}")]
    DataCorrupted { detail: String, path: Path },

    /// The input text was not valid JSON.
    /// Line and column are 1-based, as reported by `serde_json`.
    #[error("JSON parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A write went through a node that is not a container, or used an
    /// index outside `0..=len`.
    #[error("invalid structure at {path}: {detail}")]
    InvalidStructure { detail: String, path: Path },

    /// Descending further would exceed the configured nesting limit.
    #[error("nesting depth limit of {limit} exceeded at {path}")]
    DepthLimit { limit: usize, path: Path },

    /// Raised by caller-supplied decode/encode logic.
    #[error("{message} at {path}")]
    Custom { message: String, path: Path },
}

impl Error {
    /// The location the error refers to, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::KeyNotFound { path }
            | Error::ValueNotFound { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::DataCorrupted { path, .. }
            | Error::InvalidStructure { path, .. }
            | Error::DepthLimit { path, .. }
            | Error::Custom { path, .. } => Some(path),
            Error::Parse { .. } => None,
        }
    }

    pub(crate) fn invalid_structure(detail: impl Into<String>, path: &Path) -> Self {
        Error::InvalidStructure {
            detail: detail.into(),
            path: path.clone(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Convenience alias used throughout jsontree-core.
pub type Result<T> = std::result::Result<T, Error>;
