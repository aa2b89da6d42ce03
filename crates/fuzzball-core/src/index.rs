//! Inverted duple index
//!
//! Maps every duple seen in the corpus to the documents containing it.
//! The index records presence only: a document that repeats a duple is
//! listed once under it.

use std::collections::{BTreeSet, HashMap};

use ahash::RandomState;

use crate::sequence::{CodePointSequence, DocumentId, Duple};

static EMPTY: BTreeSet<DocumentId> = BTreeSet::new();

/// Duple -> documents index, built once per corpus
#[derive(Debug, Clone, Default)]
pub struct DupleIndex {
    postings: HashMap<Duple, BTreeSet<DocumentId>, RandomState>,
    document_count: usize,
}

impl DupleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every duple of `sequence` under `document_id`.
    ///
    /// Idempotent. Documents without duples are still counted so that
    /// filtering can consider them.
    pub fn add(&mut self, document_id: DocumentId, sequence: &CodePointSequence) {
        self.document_count = self.document_count.max(document_id + 1);
        for duple in sequence.duples() {
            self.postings.entry(duple).or_default().insert(document_id);
        }
    }

    /// Documents whose sequence contains `duple`, in id order
    pub fn documents_containing(&self, duple: Duple) -> &BTreeSet<DocumentId> {
        self.postings.get(&duple).unwrap_or(&EMPTY)
    }

    /// Number of distinct duples
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// One past the highest document id added
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}
