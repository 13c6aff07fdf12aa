//! # boolsearch
//!
//! An inverted index over a document collection with boolean and phrase
//! queries answered by set algebra over sorted posting lists.
//!
//! ## Features
//!
//! - HTML preprocessing into plain-text documents
//! - Configurable analysis pipeline (tokenizer, lower-casing, length and stop-word filters)
//! - Term → document → positions posting store
//! - AND / OR / NOT, co-occurrence phrase and exact phrase queries
//! - Compact little-endian binary index format with validated loading
//!
//! ## Example
//!
//! ```
//! use boolsearch::prelude::*;
//!
//! let mut builder = IndexBuilder::with_default_analyzer().unwrap();
//! builder.add_text(1, "back in black i hit the sack").unwrap();
//! builder.add_text(2, "legendary song by queen").unwrap();
//! builder.add_text(3, "best selling album of all time").unwrap();
//! let store = builder.finish();
//!
//! let evaluator = QueryEvaluator::new(&store);
//! assert_eq!(evaluator.and("black", "back"), vec![1]);
//! assert_eq!(evaluator.not("black", store.doc_ids()), vec![2, 3]);
//! assert_eq!(evaluator.phrase("back in"), vec![1]);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::analyzer::Analyzer;
    pub use crate::analysis::analyzer::standard::{AnalyzerConfig, StandardAnalyzer};
    pub use crate::document::{DocId, Document, DocumentCollection, HtmlParser};
    pub use crate::error::{BoolSearchError, Result};
    pub use crate::index::{IndexBuilder, IndexConfig, IndexEntry, PostingStore};
    pub use crate::query::{BooleanQuery, QueryEvaluator, SearchMode};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
