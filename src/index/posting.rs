//! Index entries and posting views.
//!
//! An [`IndexEntry`] keeps its postings as two parallel vectors, one with
//! the document ids and one with each document's position list. Both the
//! document ids and every position list are strictly ascending; the query
//! algorithms rely on it and never re-sort.

use crate::document::DocId;

/// Zero-based ordinal of a token within its document's token stream.
pub type Position = u32;

/// A borrowed view of one term's occurrences in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting<'a> {
    /// Document ID.
    pub doc_id: DocId,
    /// Ascending positions of the term in the document.
    pub positions: &'a [Position],
}

impl Posting<'_> {
    /// Number of occurrences in the document.
    pub fn frequency(&self) -> usize {
        self.positions.len()
    }
}

/// A term together with all of its postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    term: String,
    doc_ids: Vec<DocId>,
    positions: Vec<Vec<Position>>,
}

impl IndexEntry {
    /// Create an entry with no postings.
    pub fn new<S: Into<String>>(term: S) -> Self {
        IndexEntry {
            term: term.into(),
            doc_ids: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Assemble an entry from already ordered parts.
    ///
    /// Callers must pass parallel vectors whose document ids and position
    /// lists are strictly ascending.
    pub(crate) fn from_parts(
        term: String,
        doc_ids: Vec<DocId>,
        positions: Vec<Vec<Position>>,
    ) -> Self {
        debug_assert_eq!(doc_ids.len(), positions.len());
        let entry = IndexEntry {
            term,
            doc_ids,
            positions,
        };
        debug_assert!(entry.is_well_ordered());
        entry
    }

    /// Record one occurrence of the term.
    ///
    /// Appending a new trailing document or a new trailing position is O(1).
    /// Anything arriving out of order is placed by binary search instead, and
    /// an occurrence that is already present is ignored. Returns whether the
    /// occurrence was new.
    pub fn record(&mut self, doc_id: DocId, position: Position) -> bool {
        match self.doc_ids.last() {
            Some(&last) if last == doc_id => {
                let idx = self.doc_ids.len() - 1;
                insert_position(&mut self.positions[idx], position)
            }
            Some(&last) if last > doc_id => {
                match self.doc_ids.binary_search(&doc_id) {
                    Ok(idx) => insert_position(&mut self.positions[idx], position),
                    Err(idx) => {
                        self.doc_ids.insert(idx, doc_id);
                        self.positions.insert(idx, vec![position]);
                        true
                    }
                }
            }
            _ => {
                self.doc_ids.push(doc_id);
                self.positions.push(vec![position]);
                true
            }
        }
    }

    /// The term this entry indexes.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Ascending ids of the documents containing the term.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> usize {
        self.doc_ids.len()
    }

    /// Total number of occurrences across all documents.
    pub fn total_frequency(&self) -> usize {
        self.positions.iter().map(Vec::len).sum()
    }

    /// Positions of the term in `doc_id`, if the document contains it.
    pub fn positions_for(&self, doc_id: DocId) -> Option<&[Position]> {
        self.doc_ids
            .binary_search(&doc_id)
            .ok()
            .map(|idx| self.positions[idx].as_slice())
    }

    /// Iterate over the postings in document order.
    pub fn postings(&self) -> impl ExactSizeIterator<Item = Posting<'_>> + '_ {
        self.doc_ids
            .iter()
            .zip(&self.positions)
            .map(|(&doc_id, positions)| Posting {
                doc_id,
                positions: positions.as_slice(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Whether the document ids and every position list are strictly ascending.
    pub fn is_well_ordered(&self) -> bool {
        self.doc_ids.len() == self.positions.len()
            && is_strictly_ascending(&self.doc_ids)
            && self.positions.iter().all(|p| is_strictly_ascending(p))
    }
}

fn insert_position(positions: &mut Vec<Position>, position: Position) -> bool {
    match positions.last() {
        Some(&last) if last < position => {
            positions.push(position);
            true
        }
        None => {
            positions.push(position);
            true
        }
        _ => match positions.binary_search(&position) {
            Ok(_) => false,
            Err(idx) => {
                positions.insert(idx, position);
                true
            }
        },
    }
}

pub(crate) fn is_strictly_ascending<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_recording() {
        let mut entry = IndexEntry::new("black");
        assert!(entry.is_empty());

        assert!(entry.record(1, 0));
        assert!(entry.record(1, 4));
        assert!(entry.record(3, 2));

        assert_eq!(entry.term(), "black");
        assert_eq!(entry.doc_ids(), &[1, 3]);
        assert_eq!(entry.positions_for(1), Some(&[0, 4][..]));
        assert_eq!(entry.positions_for(3), Some(&[2][..]));
        assert_eq!(entry.positions_for(2), None);
        assert_eq!(entry.doc_frequency(), 2);
        assert_eq!(entry.total_frequency(), 3);
    }

    #[test]
    fn test_out_of_order_recording_stays_sorted() {
        let mut entry = IndexEntry::new("rock");

        entry.record(5, 3);
        entry.record(2, 7);
        entry.record(5, 1);
        entry.record(9, 0);
        entry.record(2, 4);
        entry.record(1, 0);

        assert_eq!(entry.doc_ids(), &[1, 2, 5, 9]);
        assert_eq!(entry.positions_for(2), Some(&[4, 7][..]));
        assert_eq!(entry.positions_for(5), Some(&[1, 3][..]));
        assert!(entry.is_well_ordered());
    }

    #[test]
    fn test_duplicate_occurrence_is_ignored() {
        let mut entry = IndexEntry::new("back");

        assert!(entry.record(1, 0));
        assert!(!entry.record(1, 0));
        entry.record(2, 5);
        assert!(!entry.record(1, 0));

        assert_eq!(entry.total_frequency(), 2);
        assert!(entry.is_well_ordered());
    }

    #[test]
    fn test_postings_iterator() {
        let mut entry = IndexEntry::new("queen");
        entry.record(2, 3);
        entry.record(2, 8);
        entry.record(4, 1);

        let postings: Vec<Posting> = entry.postings().collect();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].doc_id, 2);
        assert_eq!(postings[0].frequency(), 2);
        assert_eq!(postings[1].positions, &[1]);
    }
}
