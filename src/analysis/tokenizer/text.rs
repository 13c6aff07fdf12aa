//! Plain-text tokenizer.
//!
//! Splits on whitespace, then strips every character that is neither
//! alphabetic nor a hyphen from each chunk. Punctuation inside a chunk is
//! removed rather than treated as a boundary, so `"I've"` becomes `"ive"`
//! and `"best-selling"` stays a single token. Digits are dropped as well.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{BoolSearchError, Result};

/// A tokenizer for preprocessed document text.
#[derive(Clone, Debug)]
pub struct TextTokenizer {
    chunk_pattern: Arc<Regex>,
}

impl TextTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Result<Self> {
        let regex = Regex::new(r"\S+")
            .map_err(|e| BoolSearchError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(TextTokenizer {
            chunk_pattern: Arc::new(regex),
        })
    }

    fn clean(chunk: &str) -> String {
        chunk
            .chars()
            .filter(|c| c.is_alphabetic() || *c == '-')
            .collect()
    }
}

impl Default for TextTokenizer {
    fn default() -> Self {
        Self::new().expect("Default chunk pattern should be valid")
    }
}

impl Tokenizer for TextTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .chunk_pattern
            .find_iter(text)
            .filter_map(|mat| {
                let cleaned = Self::clean(mat.as_str());
                (!cleaned.is_empty()).then(|| (cleaned, mat.start(), mat.end()))
            })
            .enumerate()
            .map(|(position, (cleaned, start, end))| {
                Token::with_offsets(cleaned, position, start, end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
