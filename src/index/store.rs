//! The posting store: term dictionary plus entry arena.
//!
//! Entries live in a vector in first-seen order and are addressed by
//! [`TermId`]; the dictionary maps each term to its id. Nothing points back
//! from an entry to the store, so dropping the store releases everything.

use ahash::AHashMap;
use serde::Serialize;

use crate::document::DocId;
use crate::index::posting::{IndexEntry, Position};

/// Handle of an entry inside a [`PostingStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    /// Index of the entry in store order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The inverted index: every term mapped to its [`IndexEntry`].
#[derive(Debug, Clone, Default)]
pub struct PostingStore {
    entries: Vec<IndexEntry>,
    dictionary: AHashMap<String, TermId>,
    documents: Vec<DocId>,
}

impl PostingStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` terms.
    pub fn with_capacity(capacity: usize) -> Self {
        PostingStore {
            entries: Vec::with_capacity(capacity),
            dictionary: AHashMap::with_capacity(capacity),
            documents: Vec::new(),
        }
    }

    /// Record that `term` occurs in `doc_id` at `position`.
    ///
    /// The entry is created on first sight of the term. Out-of-order
    /// document ids or positions are sorted into place.
    pub fn record(&mut self, term: &str, doc_id: DocId, position: Position) -> TermId {
        let term_id = match self.dictionary.get(term) {
            Some(&id) => id,
            None => self.push_entry(IndexEntry::new(term)),
        };

        self.entries[term_id.index()].record(doc_id, position);
        self.register_document(doc_id);
        term_id
    }

    /// Add `doc_id` to the document universe even if it has no terms.
    pub fn register_document(&mut self, doc_id: DocId) {
        match self.documents.last() {
            Some(&last) if last >= doc_id => {
                if let Err(idx) = self.documents.binary_search(&doc_id) {
                    self.documents.insert(idx, doc_id);
                }
            }
            _ => self.documents.push(doc_id),
        }
    }

    /// Add a complete entry. Returns `None` if the term is already present.
    ///
    /// The document universe is not touched; call
    /// [`rebuild_documents`](Self::rebuild_documents) once all entries are in.
    pub(crate) fn insert_entry(&mut self, entry: IndexEntry) -> Option<TermId> {
        if self.dictionary.contains_key(entry.term()) {
            return None;
        }

        Some(self.push_entry(entry))
    }

    /// Reset the document universe to the union of every entry's documents.
    pub(crate) fn rebuild_documents(&mut self) {
        let mut documents: Vec<DocId> = self
            .entries
            .iter()
            .flat_map(|entry| entry.doc_ids().iter().copied())
            .collect();
        documents.sort_unstable();
        documents.dedup();
        self.documents = documents;
    }

    fn push_entry(&mut self, entry: IndexEntry) -> TermId {
        let term_id = TermId(self.entries.len() as u32);
        self.dictionary.insert(entry.term().to_string(), term_id);
        self.entries.push(entry);
        term_id
    }

    /// Exact lookup. An absent term is a normal outcome.
    pub fn lookup(&self, term: &str) -> Option<&IndexEntry> {
        self.term_id(term).map(|id| &self.entries[id.index()])
    }

    /// Handle of `term`, if indexed.
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    /// Entry behind a handle.
    pub fn get(&self, term_id: TermId) -> Option<&IndexEntry> {
        self.entries.get(term_id.index())
    }

    /// Every entry in store order.
    pub fn all_entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ascending ids of every document seen by the store.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.documents
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Entries ordered by descending document frequency, ties by term.
    pub fn entries_by_doc_frequency(&self) -> Vec<&IndexEntry> {
        let mut entries: Vec<&IndexEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| {
            b.doc_frequency()
                .cmp(&a.doc_frequency())
                .then_with(|| a.term().cmp(b.term()))
        });
        entries
    }

    /// Get statistics about the store.
    pub fn stats(&self) -> IndexStats {
        let term_count = self.entries.len();
        let total_postings: usize = self.entries.iter().map(IndexEntry::doc_frequency).sum();
        let total_positions: usize = self.entries.iter().map(IndexEntry::total_frequency).sum();
        let avg_postings_per_term = if term_count > 0 {
            total_postings as f64 / term_count as f64
        } else {
            0.0
        };
        let max_postings_per_term = self
            .entries
            .iter()
            .map(IndexEntry::doc_frequency)
            .max()
            .unwrap_or(0);

        IndexStats {
            term_count,
            doc_count: self.documents.len(),
            total_postings,
            total_positions,
            avg_postings_per_term,
            max_postings_per_term,
        }
    }
}

impl<'a> IntoIterator for &'a PostingStore {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Statistics about a posting store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Number of distinct terms.
    pub term_count: usize,
    /// Number of documents seen.
    pub doc_count: usize,
    /// Number of (term, document) pairs.
    pub total_postings: usize,
    /// Number of recorded token positions.
    pub total_positions: usize,
    /// Average postings per term.
    pub avg_postings_per_term: f64,
    /// Largest posting list.
    pub max_postings_per_term: usize,
}
