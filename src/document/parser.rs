//! HTML preprocessing.
//!
//! [`HtmlParser`] extracts the title and the visible text of a page:
//! `<script>` and `<style>` blocks, comments and tags are removed, the common
//! character entities are decoded and runs of whitespace collapse to a single
//! space.
//!
//! # Examples
//!
//! ```
//! use boolsearch::document::HtmlParser;
//!
//! let parser = HtmlParser::new().unwrap();
//! let doc = parser.parse(
//!     "<html><head><title>AC/DC</title></head><body><p>Back in&nbsp;Black</p></body></html>",
//!     1,
//! );
//!
//! assert_eq!(doc.title, "AC/DC");
//! assert_eq!(doc.content, "AC/DC Back in Black");
//! assert_eq!(doc.word_count, 4);
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use regex::{Captures, Regex};

use crate::document::document::{DocId, Document, DocumentCollection};
use crate::error::{BoolSearchError, Result};

const UNTITLED: &str = "Untitled";

/// Converts HTML markup into [`Document`] records.
#[derive(Debug, Clone)]
pub struct HtmlParser {
    hidden_blocks: Regex,
    tags: Regex,
    entities: Regex,
    whitespace: Regex,
    title: Regex,
}

impl HtmlParser {
    /// Create a new parser.
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| BoolSearchError::analysis(format!("Invalid regex pattern: {e}")))
        };

        Ok(HtmlParser {
            hidden_blocks: compile(
                r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->",
            )?,
            tags: compile(r"(?s)<[^>]*>")?,
            entities: compile(r"&(lt|gt|amp|quot|#39|apos|nbsp);")?,
            whitespace: compile(r"\s+")?,
            title: compile(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>")?,
        })
    }

    /// Parse a page into a document with the given id.
    pub fn parse(&self, html: &str, id: DocId) -> Document {
        Document::new(id, self.extract_title(html), self.extract_text(html))
    }

    /// Text of the `<title>` element, or `"Untitled"` if there is none.
    pub fn extract_title(&self, html: &str) -> String {
        self.title
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| self.collapse_whitespace(&self.decode_entities(m.as_str())))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Visible text of the page.
    pub fn extract_text(&self, html: &str) -> String {
        let visible = self.hidden_blocks.replace_all(html, " ");
        // Tags separate words, so "<h1>a</h1><p>b</p>" yields "a b".
        let stripped = self.tags.replace_all(&visible, " ");
        let decoded = self.decode_entities(&stripped);
        self.collapse_whitespace(&decoded)
    }

    /// Replace the supported named and numeric entities.
    pub fn decode_entities(&self, text: &str) -> String {
        self.entities
            .replace_all(text, |caps: &Captures| {
                match &caps[1] {
                    "lt" => "<",
                    "gt" => ">",
                    "amp" => "&",
                    "quot" => "\"",
                    "#39" | "apos" => "'",
                    _ => " ",
                }
                .to_string()
            })
            .into_owned()
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

/// Number of whitespace-separated words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Load every `*.html`/`*.htm` file in `dir`, in file-name order.
///
/// Ids are assigned consecutively starting at `first_id`. Files that are not
/// valid UTF-8 are decoded lossily.
pub fn load_documents_from_dir<P: AsRef<Path>>(
    dir: P,
    first_id: DocId,
) -> Result<DocumentCollection> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(BoolSearchError::not_found(format!(
            "document directory {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_html_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let parser = HtmlParser::new()?;
    let mut collection = DocumentCollection::with_capacity(paths.len());
    let mut next_id = first_id;

    for path in paths {
        let bytes = fs::read(&path)?;
        let html = String::from_utf8_lossy(&bytes);
        let document = parser.parse(&html, next_id).with_path(&path);
        debug!(
            "Parsed {} as document {} ({} words)",
            path.display(),
            next_id,
            document.word_count
        );
        collection.add(document)?;

        next_id = next_id.checked_add(1).ok_or_else(|| {
            BoolSearchError::invalid_argument("document id space exhausted")
        })?;
    }

    info!(
        "Loaded {} HTML documents from {}",
        collection.len(),
        dir.display()
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_title() {
        let parser = HtmlParser::new().unwrap();

        assert_eq!(
            parser.extract_title("<head><title>Queen &amp; Friends</title></head>"),
            "Queen & Friends"
        );
        assert_eq!(
            parser.extract_title("<title lang=\"ru\">Музыка</title>"),
            "Музыка"
        );
        assert_eq!(parser.extract_title("<p>no title</p>"), "Untitled");
    }

    #[test]
    fn test_hidden_blocks_are_removed() {
        let parser = HtmlParser::new().unwrap();
        let html = "<body><script type=\"text/javascript\">var rock = 1;</script>\
                    <style>p { color: black; }</style><!-- queen -->\
                    <h1>Visible</h1><p>text</p></body>";

        assert_eq!(parser.extract_text(html), "Visible text");
    }

    #[test]
    fn test_entities_are_decoded() {
        let parser = HtmlParser::new().unwrap();
        let text = parser.extract_text("<p>&lt;b&gt; &quot;rock&quot; &#39;n&apos; roll&nbsp;x &copy;</p>");

        assert_eq!(text, "<b> \"rock\" 'n' roll x &copy;");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one\ttwo\nthree "), 3);
    }

    #[test]
    fn test_load_documents_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("b.htm"),
            "<title>Second</title><p>legendary song by queen</p>",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("a.html"),
            "<title>First</title><p>back in black</p>",
        )
        .unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let collection = load_documents_from_dir(temp_dir.path(), 10).unwrap();
        assert_eq!(collection.ids(), vec![10, 11]);

        let first = collection.get(10).unwrap();
        assert_eq!(first.title, "First");
        assert_eq!(first.content, "First back in black");
        assert!(first.path.as_ref().unwrap().ends_with("a.html"));
        assert_eq!(collection.get(11).unwrap().title, "Second");
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_documents_from_dir(temp_dir.path().join("missing"), 1).is_err());
    }
}
