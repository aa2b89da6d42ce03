//! FuzzBall Core Engine
//!
//! Approximate string search over a fixed corpus of short entries, tolerant
//! of typos, reordering and partial matches.
//!
//! A query runs in two stages:
//!
//! 1. **Overlap filter** - count the distinct duples (adjacent code point
//!    pairs) each entry shares with the query, via an inverted index, and
//!    keep only the entries reaching the maximum count.
//! 2. **Alignment** - score each survivor with Smith-Waterman local alignment
//!    and recover the matched span.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations (SIMD, parallel)
//! - `simd` - SIMD-accelerated ignore-pattern search via memchr
//! - `parallel` - Parallel alignment via rayon for large shortlists
//!
//! # Example
//!
//! ```rust
//! use fuzzball_core::{SearchOptions, Searcher};
//!
//! let searcher = Searcher::new(["hello", "yellow", "jello"]);
//! let results = searcher.search("hello", &SearchOptions::new().descending());
//!
//! assert_eq!(results[0].document, "hello");
//! assert_eq!(results[0].score, 10);
//! ```

pub mod alignment;
pub mod error;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod options;
pub mod searcher;
pub mod sequence;

// Re-export main types at crate root
pub use alignment::{align, AlignmentResult, Scoring};
pub use error::{Result, SearchError};
pub use filter::{overlap_count, shortlist, shortlist_indexed};
pub use index::DupleIndex;
pub use normalize::Normalizer;
pub use options::{Order, SearchOptions, SearcherOptions};
pub use searcher::{SearchResult, Searcher};
pub use sequence::{CodePointSequence, DocumentId, Duple};
