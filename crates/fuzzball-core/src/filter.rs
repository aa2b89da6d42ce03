//! Overlap filtering
//!
//! Coarse pre-filter that bounds how many alignments a query runs. Every
//! candidate gets an overlap count (distinct query duples it contains) and
//! only the candidates reaching the corpus-wide maximum survive. Ties are
//! all kept.

use std::collections::HashSet;

use ahash::RandomState;

use crate::index::DupleIndex;
use crate::sequence::{CodePointSequence, DocumentId, Duple};

fn distinct_duples(sequence: &CodePointSequence) -> HashSet<Duple, RandomState> {
    sequence.duples().collect()
}

/// Number of distinct query duples that occur at least once in `candidate`
pub fn overlap_count(query: &CodePointSequence, candidate: &CodePointSequence) -> usize {
    let haystack = distinct_duples(candidate);
    distinct_duples(query)
        .iter()
        .filter(|d| haystack.contains(*d))
        .count()
}

/// Linear-scan shortlist over `corpus`, returned in corpus order.
///
/// Empty when the corpus is empty or the query has no duples.
pub fn shortlist(query: &CodePointSequence, corpus: &[CodePointSequence]) -> Vec<DocumentId> {
    let needles = distinct_duples(query);
    if needles.is_empty() {
        return Vec::new();
    }

    let mut max_overlap: Option<usize> = None;
    let counts: Vec<usize> = corpus
        .iter()
        .map(|candidate| {
            let haystack = distinct_duples(candidate);
            let n = needles.iter().filter(|d| haystack.contains(*d)).count();
            max_overlap = max_overlap.max(Some(n));
            n
        })
        .collect();

    select_max(&counts, max_overlap)
}

/// Index-backed shortlist. Same result as [`shortlist`] over the indexed corpus.
pub fn shortlist_indexed(query: &CodePointSequence, index: &DupleIndex) -> Vec<DocumentId> {
    let needles = distinct_duples(query);
    if needles.is_empty() || index.document_count() == 0 {
        return Vec::new();
    }

    let mut counts = vec![0usize; index.document_count()];
    for duple in needles {
        for &id in index.documents_containing(duple) {
            counts[id] += 1;
        }
    }

    let max_overlap = counts.iter().copied().max();
    select_max(&counts, max_overlap)
}

fn select_max(counts: &[usize], max_overlap: Option<usize>) -> Vec<DocumentId> {
    match max_overlap {
        Some(max) => counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == max)
            .map(|(id, _)| id)
            .collect(),
        None => Vec::new(),
    }
}
