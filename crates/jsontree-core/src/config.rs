//! Session configuration for the decoder and encoder cores.

use crate::strategy::{DateDecodingStrategy, DateEncodingStrategy, WrongStructureStrategy};

/// Default nesting limit for decode and encode sessions.
///
/// Both cores recurse once per level of document nesting; a child at a
/// depth beyond the limit fails with [`crate::Error::DepthLimit`] instead of
/// recursing further.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options shared by every decoder of one decode session.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub wrong_structure: WrongStructureStrategy,
    pub date: DateDecodingStrategy,
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            wrong_structure: WrongStructureStrategy::default(),
            date: DateDecodingStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_wrong_structure(mut self, strategy: WrongStructureStrategy) -> Self {
        self.wrong_structure = strategy;
        self
    }

    pub fn with_date(mut self, strategy: DateDecodingStrategy) -> Self {
        self.date = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options shared by every encoder of one encode session.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub date: DateEncodingStrategy,
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            date: DateEncodingStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn with_date(mut self, strategy: DateEncodingStrategy) -> Self {
        self.date = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
