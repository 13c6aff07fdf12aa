//! Boolean and phrase evaluation over a posting store.
//!
//! An absent term behaves as an empty document list: AND with it is empty,
//! OR with it returns the other operand, NOT of it returns the universe.

use log::debug;

use crate::document::DocId;
use crate::index::posting::{Position, is_strictly_ascending};
use crate::index::store::PostingStore;
use crate::query::set_ops::{
    difference_sorted, difference_unsorted, intersect_sorted, union_sorted,
};

/// Evaluates queries against a read-only [`PostingStore`].
///
/// ```
/// use boolsearch::index::IndexBuilder;
/// use boolsearch::query::QueryEvaluator;
///
/// let mut builder = IndexBuilder::with_default_analyzer().unwrap();
/// builder.add_text(1, "back in black").unwrap();
/// builder.add_text(2, "legendary song by queen").unwrap();
/// let store = builder.finish();
///
/// let evaluator = QueryEvaluator::new(&store);
/// assert_eq!(evaluator.and("black", "back"), vec![1]);
/// assert_eq!(evaluator.or("queen", "jackson"), vec![2]);
/// assert_eq!(evaluator.not("black", store.doc_ids()), vec![2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    store: &'a PostingStore,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(store: &'a PostingStore) -> Self {
        QueryEvaluator { store }
    }

    pub fn store(&self) -> &'a PostingStore {
        self.store
    }

    /// Document ids of `term`; empty if the term is not indexed.
    pub fn lookup(&self, term: &str) -> &'a [DocId] {
        self.store
            .lookup(term)
            .map(|entry| entry.doc_ids())
            .unwrap_or(&[])
    }

    /// Documents containing both terms.
    pub fn and(&self, t1: &str, t2: &str) -> Vec<DocId> {
        intersect_sorted(self.lookup(t1), self.lookup(t2))
    }

    /// Documents containing either term.
    pub fn or(&self, t1: &str, t2: &str) -> Vec<DocId> {
        union_sorted(self.lookup(t1), self.lookup(t2))
    }

    /// Documents of `all_docs` that do not contain `term`.
    ///
    /// A strictly ascending `all_docs` is merged against the postings;
    /// any other input is filtered in its own order.
    pub fn not(&self, term: &str, all_docs: &[DocId]) -> Vec<DocId> {
        let postings = self.lookup(term);
        if is_strictly_ascending(all_docs) {
            difference_sorted(all_docs, postings)
        } else {
            difference_unsorted(all_docs, postings)
        }
    }

    /// Documents containing every term, intersecting the rarest terms first.
    pub fn and_all<S: AsRef<str>>(&self, terms: &[S]) -> Vec<DocId> {
        let mut lists: Vec<&[DocId]> = terms.iter().map(|t| self.lookup(t.as_ref())).collect();
        lists.sort_by_key(|list| list.len());

        let Some((first, rest)) = lists.split_first() else {
            return Vec::new();
        };

        let mut result = first.to_vec();
        for list in rest {
            if result.is_empty() {
                break;
            }
            result = intersect_sorted(&result, list);
        }
        result
    }

    /// Documents containing any of the terms.
    pub fn or_all<S: AsRef<str>>(&self, terms: &[S]) -> Vec<DocId> {
        terms.iter().fold(Vec::new(), |acc, term| {
            union_sorted(&acc, self.lookup(term.as_ref()))
        })
    }

    /// Documents in which every whitespace-separated term of `query` occurs.
    ///
    /// Term adjacency is not checked. A query with fewer than two terms
    /// matches nothing.
    pub fn phrase(&self, query: &str) -> Vec<DocId> {
        let terms: Vec<&str> = query.split_whitespace().collect();
        self.phrase_terms(&terms)
    }

    /// [`phrase`](Self::phrase) over already split terms.
    pub fn phrase_terms<S: AsRef<str>>(&self, terms: &[S]) -> Vec<DocId> {
        if terms.len() < 2 {
            debug!("Phrase with {} terms matches nothing", terms.len());
            return Vec::new();
        }

        let mut result = self.lookup(terms[0].as_ref()).to_vec();
        for term in &terms[1..] {
            if result.is_empty() {
                break;
            }
            result = intersect_sorted(&result, self.lookup(term.as_ref()));
        }
        result
    }

    /// Documents in which the terms of `query` occur at consecutive positions.
    pub fn phrase_exact(&self, query: &str) -> Vec<DocId> {
        let terms: Vec<&str> = query.split_whitespace().collect();
        self.phrase_exact_terms(&terms)
    }

    /// [`phrase_exact`](Self::phrase_exact) over already split terms.
    pub fn phrase_exact_terms<S: AsRef<str>>(&self, terms: &[S]) -> Vec<DocId> {
        let candidates = self.phrase_terms(terms);
        let Some(entries) = terms
            .iter()
            .map(|term| self.store.lookup(term.as_ref()))
            .collect::<Option<Vec<_>>>()
        else {
            return Vec::new();
        };

        candidates
            .into_iter()
            .filter(|&doc_id| {
                let mut starts: Vec<Position> = match entries[0].positions_for(doc_id) {
                    Some(positions) => positions.to_vec(),
                    None => return false,
                };

                for (offset, entry) in entries.iter().enumerate().skip(1) {
                    let Some(positions) = entry.positions_for(doc_id) else {
                        return false;
                    };
                    let Ok(offset) = Position::try_from(offset) else {
                        return false;
                    };
                    starts.retain(|&start| {
                        start
                            .checked_add(offset)
                            .is_some_and(|p| positions.binary_search(&p).is_ok())
                    });
                    if starts.is_empty() {
                        return false;
                    }
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(docs: &[(DocId, &str)]) -> PostingStore {
        let mut store = PostingStore::new();
        for &(doc_id, text) in docs {
            store.register_document(doc_id);
            for (position, term) in text.split_whitespace().enumerate() {
                store.record(term, doc_id, position as Position);
            }
        }
        store
    }

    #[test]
    fn test_absent_terms_degrade_gracefully() {
        let store = store(&[(1, "rock"), (2, "queen")]);
        let evaluator = QueryEvaluator::new(&store);

        assert!(evaluator.lookup("jazz").is_empty());
        assert!(evaluator.and("rock", "jazz").is_empty());
        assert_eq!(evaluator.or("jazz", "queen"), vec![2]);
        assert!(evaluator.or("jazz", "blues").is_empty());
        assert_eq!(evaluator.not("jazz", &[1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_not_with_unsorted_universe() {
        let store = store(&[(1, "rock"), (2, "queen"), (3, "rock")]);
        let evaluator = QueryEvaluator::new(&store);

        assert_eq!(evaluator.not("rock", &[3, 2, 1]), vec![2]);
        assert_eq!(evaluator.not("queen", &[3, 1, 2]), vec![3, 1]);
    }

    #[test]
    fn test_and_all_and_or_all() {
        let store = store(&[(1, "a1 b1 c1"), (2, "a1 c1"), (3, "a1 b1 c1"), (4, "c1")]);
        let evaluator = QueryEvaluator::new(&store);

        assert_eq!(evaluator.and_all(&["c1", "a1", "b1"]), vec![1, 3]);
        assert!(evaluator.and_all(&["a1", "zz"]).is_empty());
        assert!(evaluator.and_all::<&str>(&[]).is_empty());
        assert_eq!(evaluator.or_all(&["b1", "zz", "c1"]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_phrase_is_cooccurrence() {
        let store = store(&[(1, "back in black"), (2, "black is back"), (3, "back")]);
        let evaluator = QueryEvaluator::new(&store);

        assert_eq!(evaluator.phrase("back black"), vec![1, 2]);
        assert!(evaluator.phrase("back").is_empty());
        assert!(evaluator.phrase("   ").is_empty());
        assert!(evaluator.phrase("back missing").is_empty());
    }

    #[test]
    fn test_phrase_exact_requires_adjacency() {
        let store = store(&[
            (1, "back in black"),
            (2, "black in back"),
            (3, "in the back in black"),
        ]);
        let evaluator = QueryEvaluator::new(&store);

        assert_eq!(evaluator.phrase("in black"), vec![1, 2, 3]);
        assert_eq!(evaluator.phrase_exact("in black"), vec![1, 3]);
        assert_eq!(evaluator.phrase_exact("back in black"), vec![1, 3]);
        assert!(evaluator.phrase_exact("black back").is_empty());
        assert!(evaluator.phrase_exact("black").is_empty());
    }

    #[test]
    fn test_phrase_exact_repeated_term() {
        let store = store(&[(1, "la la land"), (2, "la land la")]);
        let evaluator = QueryEvaluator::new(&store);

        assert_eq!(evaluator.phrase_exact("la la"), vec![1]);
    }
}
