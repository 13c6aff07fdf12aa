//! Index builder: runs documents through the analyzer into a posting store.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::document::{DocId, Document, DocumentCollection};
use crate::error::{BoolSearchError, Result};
use crate::index::config::IndexConfig;
use crate::index::posting::Position;
use crate::index::store::PostingStore;

/// Builds a [`PostingStore`] from documents supplied in ascending id order.
///
/// ```
/// use boolsearch::index::IndexBuilder;
///
/// let mut builder = IndexBuilder::with_default_analyzer().unwrap();
/// builder.add_text(1, "Back in Black, I hit the sack").unwrap();
/// builder.add_text(2, "Legendary song by Queen").unwrap();
///
/// let store = builder.finish();
/// assert_eq!(store.lookup("black").unwrap().doc_ids(), &[1]);
/// assert_eq!(store.lookup("queen").unwrap().positions_for(2), Some(&[3][..]));
/// ```
#[derive(Debug)]
pub struct IndexBuilder {
    analyzer: Arc<dyn Analyzer>,
    store: PostingStore,
    last_doc_id: Option<DocId>,
}

impl IndexBuilder {
    /// Create a builder around an existing analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>, config: &IndexConfig) -> Self {
        IndexBuilder {
            analyzer,
            store: PostingStore::with_capacity(config.initial_capacity),
            last_doc_id: None,
        }
    }

    /// Create a builder with a [`StandardAnalyzer`] configured from `config`.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = StandardAnalyzer::with_config(config.analyzer.clone())?;
        Ok(Self::new(Arc::new(analyzer), config))
    }

    /// Create a builder with the default configuration.
    pub fn with_default_analyzer() -> Result<Self> {
        Self::from_config(&IndexConfig::default())
    }

    /// Analyze `text` and record every term under `doc_id`.
    ///
    /// Returns the number of terms recorded.
    pub fn add_text(&mut self, doc_id: DocId, text: &str) -> Result<usize> {
        self.begin_document(doc_id);

        let mut recorded = 0;
        for token in self.analyzer.analyze(text)? {
            let position = Position::try_from(token.position).map_err(|_| {
                BoolSearchError::index(format!(
                    "document {doc_id} has more tokens than fit in a position"
                ))
            })?;
            self.store.record(&token.text, doc_id, position);
            recorded += 1;
        }

        debug!("Indexed document {doc_id}: {recorded} terms");
        Ok(recorded)
    }

    /// Record already normalized terms under `doc_id`, each at its ordinal.
    pub fn add_terms<I, S>(&mut self, doc_id: DocId, terms: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.begin_document(doc_id);

        let mut recorded = 0;
        for term in terms {
            let position = Position::try_from(recorded).map_err(|_| {
                BoolSearchError::index(format!(
                    "document {doc_id} has more tokens than fit in a position"
                ))
            })?;
            self.store.record(term.as_ref(), doc_id, position);
            recorded += 1;
        }

        Ok(recorded)
    }

    /// Index the content of a preprocessed document.
    pub fn add_document(&mut self, document: &Document) -> Result<usize> {
        self.add_text(document.id, &document.content)
    }

    /// Index a whole collection.
    pub fn add_collection(&mut self, collection: &DocumentCollection) -> Result<usize> {
        let mut total = 0;
        for document in collection {
            total += self.add_document(document)?;
        }
        Ok(total)
    }

    fn begin_document(&mut self, doc_id: DocId) {
        if let Some(last) = self.last_doc_id
            && doc_id <= last
        {
            warn!("Document {doc_id} indexed after document {last}; postings will be re-sorted");
        }
        self.last_doc_id = Some(self.last_doc_id.map_or(doc_id, |last| last.max(doc_id)));
        self.store.register_document(doc_id);
    }

    /// The store built so far.
    pub fn store(&self) -> &PostingStore {
        &self.store
    }

    /// Ids of every document added so far, including ones without terms.
    pub fn doc_ids(&self) -> &[DocId] {
        self.store.doc_ids()
    }

    /// Finish building and hand over the store.
    pub fn finish(self) -> PostingStore {
        let stats = self.store.stats();
        info!(
            "Built index: {} terms over {} documents",
            stats.term_count, stats.doc_count
        );
        self.store
    }

    /// Build a store from a collection in one call.
    pub fn build(config: &IndexConfig, collection: &DocumentCollection) -> Result<PostingStore> {
        let mut builder = Self::from_config(config)?;
        builder.add_collection(collection)?;
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::standard::AnalyzerConfig;

    #[test]
    fn test_positions_are_token_ordinals() {
        let mut builder = IndexBuilder::with_default_analyzer().unwrap();
        let recorded = builder.add_text(1, "Back in black, I hit the sack").unwrap();

        // "I" is shorter than the minimum length.
        assert_eq!(recorded, 6);
        let store = builder.finish();
        assert_eq!(store.lookup("back").unwrap().positions_for(1), Some(&[0][..]));
        assert_eq!(store.lookup("hit").unwrap().positions_for(1), Some(&[3][..]));
        assert!(store.lookup("i").is_none());
    }

    #[test]
    fn test_empty_document_joins_universe() {
        let mut builder = IndexBuilder::with_default_analyzer().unwrap();
        builder.add_text(1, "rock").unwrap();
        assert_eq!(builder.add_text(2, "1984 !!").unwrap(), 0);
        builder.add_text(3, "rock").unwrap();

        assert_eq!(builder.doc_ids(), &[1, 2, 3]);
        assert_eq!(builder.store().lookup("rock").unwrap().doc_ids(), &[1, 3]);
    }

    #[test]
    fn test_out_of_order_documents_are_sorted() {
        let mut builder = IndexBuilder::with_default_analyzer().unwrap();
        builder.add_text(3, "black sack").unwrap();
        builder.add_text(1, "back in black").unwrap();
        builder.add_text(2, "black").unwrap();

        let store = builder.finish();
        assert_eq!(store.lookup("black").unwrap().doc_ids(), &[1, 2, 3]);
        assert!(store.iter().all(|entry| entry.is_well_ordered()));
    }

    #[test]
    fn test_add_terms() {
        let mut builder = IndexBuilder::with_default_analyzer().unwrap();
        builder.add_terms(7, ["queen", "rock", "queen"]).unwrap();

        let store = builder.finish();
        assert_eq!(store.lookup("queen").unwrap().positions_for(7), Some(&[0, 2][..]));
    }

    #[test]
    fn test_build_with_stop_words() {
        let config = IndexConfig {
            analyzer: AnalyzerConfig {
                remove_stop_words: true,
                ..AnalyzerConfig::default()
            },
            ..IndexConfig::default()
        };
        let mut collection = DocumentCollection::new();
        collection
            .add(Document::new(1, "AC/DC", "back in black"))
            .unwrap();

        let store = IndexBuilder::build(&config, &collection).unwrap();
        assert!(store.lookup("in").is_none());
        assert_eq!(store.lookup("black").unwrap().positions_for(1), Some(&[1][..]));
    }
}
