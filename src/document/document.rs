//! Plain-text document records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BoolSearchError, Result};

/// Identifier of an indexed document.
///
/// Stored on disk as an `int32`, so values above `i32::MAX` are rejected by
/// the serializer.
pub type DocId = u32;

/// A preprocessed document ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-assigned identifier, ascending across a build.
    pub id: DocId,
    /// Title taken from `<title>`, or `"Untitled"`.
    pub title: String,
    /// Plain-text content.
    pub content: String,
    /// Where the document was loaded from, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Number of whitespace-separated words in `content`.
    pub word_count: usize,
}

impl Document {
    /// Create a document from already extracted text.
    pub fn new<T: Into<String>, C: Into<String>>(id: DocId, title: T, content: C) -> Self {
        let content = content.into();
        let word_count = super::parser::count_words(&content);

        Document {
            id,
            title: title.into(),
            content,
            path: None,
            word_count,
        }
    }

    /// Attach the source path.
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

/// An ordered collection of documents with strictly ascending ids.
#[derive(Debug, Clone, Default)]
pub struct DocumentCollection {
    documents: Vec<Document>,
}

impl DocumentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` documents.
    pub fn with_capacity(capacity: usize) -> Self {
        DocumentCollection {
            documents: Vec::with_capacity(capacity),
        }
    }

    /// Append a document. Its id must be greater than every id already held.
    pub fn add(&mut self, document: Document) -> Result<()> {
        if let Some(last) = self.documents.last()
            && document.id <= last.id
        {
            return Err(BoolSearchError::invalid_argument(format!(
                "document id {} is not greater than previous id {}",
                document.id, last.id
            )));
        }

        self.documents.push(document);
        Ok(())
    }

    /// Look up a document by id.
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents
            .binary_search_by_key(&id, |doc| doc.id)
            .ok()
            .map(|idx| &self.documents[idx])
    }

    /// All document ids in ascending order.
    pub fn ids(&self) -> Vec<DocId> {
        self.documents.iter().map(|doc| doc.id).collect()
    }

    /// Iterate over the documents in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
