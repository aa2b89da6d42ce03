//! Searcher - corpus ownership and query orchestration

use std::cmp::Reverse;
use std::hash::{Hash, Hasher};

use ahash::AHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::alignment::AlignmentResult;
use crate::error::{Result, SearchError};
use crate::filter;
use crate::index::DupleIndex;
use crate::normalize::Normalizer;
use crate::options::{Order, SearchOptions, SearcherOptions};
use crate::sequence::{CodePointSequence, DocumentId};

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: DocumentId,
    /// The corpus entry as it was supplied
    pub document: String,
    pub score: i32,
    /// (query_index, candidate_index) pairs of the best local alignment
    pub alignment: Vec<(usize, usize)>,
    /// Aligned span of the normalized entry
    pub matched: String,
}

impl SearchResult {
    fn new(document_id: DocumentId, document: &str, aligned: AlignmentResult) -> Self {
        Self {
            document_id,
            document: document.to_string(),
            score: aligned.score,
            alignment: aligned.alignment,
            matched: aligned.matched.to_string(),
        }
    }
}

/// Fuzzy searcher over a fixed corpus
///
/// Immutable once built, so one instance can serve concurrent queries
/// from several threads without locking.
#[derive(Debug, Clone)]
pub struct Searcher {
    documents: Vec<String>,
    sequences: Vec<CodePointSequence>,
    index: DupleIndex,
    normalizer: Normalizer,
    options: SearcherOptions,
    index_hash: String,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl Searcher {
    /// Build a searcher with default options
    pub fn new<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(corpus, SearcherOptions::default())
    }

    /// Build a searcher, stripping `options.ignore` from every entry
    pub fn with_options<I, S>(corpus: I, options: SearcherOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<String> = corpus.into_iter().map(Into::into).collect();
        let normalizer = Normalizer::new(options.ignore.iter().cloned());

        let sequences: Vec<CodePointSequence> =
            documents.iter().map(|d| normalizer.sequence(d)).collect();

        let mut index = DupleIndex::new();
        for (id, sequence) in sequences.iter().enumerate() {
            index.add(id, sequence);
        }

        let index_hash = compute_hash(&documents, &normalizer);

        debug!(
            documents = documents.len(),
            duples = index.len(),
            ignore = options.ignore.len(),
            "built duple index"
        );

        Self {
            documents,
            sequences,
            index,
            normalizer,
            options,
            index_hash,
        }
    }

    /// Build from raw bytes, e.g. file contents.
    ///
    /// Fails on the first entry that is not valid UTF-8.
    pub fn from_bytes(corpus: Vec<Vec<u8>>, options: SearcherOptions) -> Result<Self> {
        let documents = corpus
            .into_iter()
            .enumerate()
            .map(|(document, bytes)| {
                String::from_utf8(bytes).map_err(|e| SearchError::InvalidEntry {
                    document,
                    source: e.utf8_error(),
                })
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(Self::with_options(documents, options))
    }

    /// Rank corpus entries against `term`.
    ///
    /// Terms shorter than two characters return nothing.
    pub fn search(&self, term: &str, options: &SearchOptions) -> Vec<SearchResult> {
        if term.chars().count() < 2 {
            return Vec::new();
        }

        let query = self.normalizer.sequence(term);
        let candidates = filter::shortlist_indexed(&query, &self.index);

        let mut results = self.align_candidates(&query, &candidates);

        // Stable: equal scores keep corpus order
        match options.order {
            Order::Ascending => results.sort_by_key(|r| r.score),
            Order::Descending => results.sort_by_key(|r| Reverse(r.score)),
        }

        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        debug!(
            query_len = query.len(),
            shortlisted = candidates.len(),
            returned = results.len(),
            order = %options.order,
            "search complete"
        );

        results
    }

    /// Align against every candidate - parallel for large shortlists
    #[cfg(feature = "parallel")]
    fn align_candidates(
        &self,
        query: &CodePointSequence,
        candidates: &[DocumentId],
    ) -> Vec<SearchResult> {
        if candidates.len() >= self.options.parallel_threshold {
            candidates
                .par_iter()
                .map(|&id| self.align_one(query, id))
                .collect()
        } else {
            self.align_sequential(query, candidates)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn align_candidates(
        &self,
        query: &CodePointSequence,
        candidates: &[DocumentId],
    ) -> Vec<SearchResult> {
        self.align_sequential(query, candidates)
    }

    fn align_sequential(
        &self,
        query: &CodePointSequence,
        candidates: &[DocumentId],
    ) -> Vec<SearchResult> {
        candidates
            .iter()
            .map(|&id| self.align_one(query, id))
            .collect()
    }

    fn align_one(&self, query: &CodePointSequence, id: DocumentId) -> SearchResult {
        let aligned = self.options.scoring.align(query, &self.sequences[id]);
        SearchResult::new(id, &self.documents[id], aligned)
    }

    /// Corpus entries in id order
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Normalized sequence of one entry
    pub fn sequence(&self, id: DocumentId) -> Option<&CodePointSequence> {
        self.sequences.get(id)
    }

    pub fn index(&self) -> &DupleIndex {
        &self.index
    }

    pub fn options(&self) -> &SearcherOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check if the searcher has a corpus
    pub fn is_ready(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Fingerprint of corpus and ignore patterns, for change detection
    pub fn index_hash(&self) -> &str {
        &self.index_hash
    }
}

fn compute_hash(documents: &[String], normalizer: &Normalizer) -> String {
    let mut hasher = AHasher::default();
    for d in documents {
        d.hash(&mut hasher);
    }
    for p in normalizer.patterns() {
        p.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_searcher() -> Searcher {
        Searcher::new(["hello", "yellow", "jello", "mellow yellow", "help"])
    }

    fn scores(results: &[SearchResult]) -> Vec<i32> {
        results.iter().map(|r| r.score).collect()
    }

    #[test]
    fn test_exact_entry_ranks_first() {
        let searcher = Searcher::new(["hello", "yellow", "jello"]);
        let results = searcher.search("hello", &SearchOptions::new().descending());

        assert!(!results.is_empty());
        assert_eq!(results[0].document, "hello");
        assert_eq!(results[0].score, 10);
        assert_eq!(results[0].alignment, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(results[0].matched, "hello");
        assert!(results.iter().skip(1).all(|r| r.score <= 10));
    }

    #[test]
    fn test_tied_overlap_all_aligned() {
        let searcher = Searcher::new(["jello", "yellow", "xyz"]);
        let results = searcher.search("hello", &SearchOptions::new().descending());

        let docs: Vec<&str> = results.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(docs, vec!["jello", "yellow"]);
        assert_eq!(scores(&results), vec![8, 8]);
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let searcher = test_searcher();
        for term in ["", "x", "é"] {
            assert!(searcher.search(term, &SearchOptions::default()).is_empty());
            assert!(searcher
                .search(term, &SearchOptions::new().descending().with_limit(5))
                .is_empty());
        }
    }

    #[test]
    fn test_empty_corpus() {
        let searcher = Searcher::default();
        assert!(!searcher.is_ready());
        assert!(searcher.search("hello", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        // No shared duples: every entry is shortlisted with mixed scores
        let searcher = Searcher::new(["a-b-c", "zzz", "cxa", "b"]);
        let asc = searcher.search("abc", &SearchOptions::default());
        let desc = searcher.search("abc", &SearchOptions::new().descending());

        assert_eq!(asc.len(), 4);
        assert!(scores(&asc).windows(2).all(|w| w[0] <= w[1]));
        assert!(scores(&desc).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_equal_scores_keep_corpus_order() {
        let searcher = Searcher::new(["xaby", "zabw", "qabr"]);
        let asc = searcher.search("ab", &SearchOptions::default());
        let desc = searcher.search("ab", &SearchOptions::new().descending());

        let ids = |r: &[SearchResult]| r.iter().map(|x| x.document_id).collect::<Vec<_>>();
        assert_eq!(ids(&asc), vec![0, 1, 2]);
        assert_eq!(ids(&desc), vec![0, 1, 2]);
    }

    #[test]
    fn test_limit_truncates_ties() {
        let searcher = Searcher::new(["xaby", "zabw", "qabr"]);
        let results = searcher.search("ab", &SearchOptions::new().with_limit(2));
        assert_eq!(results.len(), 2);

        let unbounded = searcher.search("ab", &SearchOptions::new().with_limit(0));
        assert_eq!(unbounded.len(), 3);
    }

    #[test]
    fn test_limit_and_descending() {
        let searcher = Searcher::new(["abc", "xyz"]);
        let results = searcher.search("abc", &SearchOptions::new().descending().with_limit(1));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document, "abc");
        assert_eq!(results[0].score, 6);
    }

    #[test]
    fn test_ignore_patterns() {
        let options = SearcherOptions::default().ignore([".txt"]);
        let searcher = Searcher::with_options(["notes.txt", "nodes.txt"], options);

        let results = searcher.search("notes", &SearchOptions::new().descending());
        assert_eq!(results[0].document, "notes.txt");
        assert_eq!(results[0].score, 10);
        assert_eq!(results[0].matched, "notes");
    }

    #[test]
    fn test_ignore_applies_to_query() {
        let options = SearcherOptions::default().ignore(["-"]);
        let searcher = Searcher::with_options(["abcd"], options);

        let results = searcher.search("a-b-c-d", &SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 8);
    }

    #[test]
    fn test_query_stripped_to_nothing() {
        let options = SearcherOptions::default().ignore(["xx"]);
        let searcher = Searcher::with_options(["abc"], options);
        assert!(searcher.search("xx", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let corpus = vec![b"fine".to_vec(), vec![0x66, 0xff, 0x6f]];
        let err = Searcher::from_bytes(corpus, SearcherOptions::default()).unwrap_err();
        match err {
            SearchError::InvalidEntry { document, .. } => assert_eq!(document, 1),
        }
    }

    #[test]
    fn test_from_bytes_ok() {
        let corpus = vec!["hello".as_bytes().to_vec(), "world".as_bytes().to_vec()];
        let searcher = Searcher::from_bytes(corpus, SearcherOptions::default()).unwrap();
        assert_eq!(searcher.len(), 2);
        assert_eq!(searcher.documents()[1], "world");
    }

    #[test]
    fn test_index_hash_changes() {
        let a = Searcher::new(["a"]);
        let b = Searcher::new(["b"]);
        let a2 = Searcher::new(["a"]);

        assert_ne!(a.index_hash(), b.index_hash());
        assert_eq!(a.index_hash(), a2.index_hash());
    }

    #[test]
    fn test_search_does_not_mutate() {
        let searcher = test_searcher();
        let before = searcher.index().len();
        let first = searcher.search("yello", &SearchOptions::default());
        let second = searcher.search("yello", &SearchOptions::default());

        assert_eq!(first, second);
        assert_eq!(searcher.index().len(), before);
    }
}
