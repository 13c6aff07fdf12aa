//! Document preprocessing.
//!
//! Turns raw HTML pages into [`Document`] records with a stable integer id,
//! a title and plain-text content that the analyzer can tokenize.

#[allow(clippy::module_inception)]
pub mod document;
pub mod parser;

pub use document::{DocId, Document, DocumentCollection};
pub use parser::{HtmlParser, count_words, load_documents_from_dir};
