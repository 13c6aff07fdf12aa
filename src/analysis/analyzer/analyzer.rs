//! Core analyzer trait definition.
//!
//! An analyzer is the tokenizer collaborator seen from the index builder:
//!
//! ```text
//! Plain text → Tokenizer → Filter 1 → … → Filter N → terms with positions
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Implementations must emit tokens whose `position` is the zero-based
/// ordinal of the token in the returned stream, and must be restartable:
/// analyzing the same text twice yields the same stream.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Convenience wrapper collecting only the term texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
