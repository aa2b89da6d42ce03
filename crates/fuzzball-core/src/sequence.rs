//! Code point sequences
//!
//! Every corpus entry and every query is reduced to a sequence of Unicode
//! scalar values before it reaches the index or the aligner. Comparison is
//! exact code-point equality; no case folding or normalization happens here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered pair of adjacent code points.
pub type Duple = (u32, u32);

/// Position of an entry in the corpus.
pub type DocumentId = usize;

/// Immutable sequence of Unicode scalar values
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodePointSequence(Vec<u32>);

impl CodePointSequence {
    /// Decompose a string into its code points
    pub fn new(text: &str) -> Self {
        Self(text.chars().map(u32::from).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Iterate over every duple, repeats included.
    ///
    /// A sequence of length `L` yields `max(L - 1, 0)` duples.
    pub fn duples(&self) -> impl Iterator<Item = Duple> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Rebuild the string form. Values that are not scalar values become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl From<Vec<u32>> for CodePointSequence {
    fn from(code_points: Vec<u32>) -> Self {
        Self(code_points)
    }
}

impl From<&[u32]> for CodePointSequence {
    fn from(code_points: &[u32]) -> Self {
        Self(code_points.to_vec())
    }
}

impl From<&str> for CodePointSequence {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for CodePointSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
