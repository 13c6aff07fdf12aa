//! Text analysis: turns preprocessed document text into normalized terms.
//!
//! The index builder only sees the [`Analyzer`] trait. The bundled
//! [`StandardAnalyzer`] lower-cases, strips punctuation, enforces a minimum
//! term length, and can optionally drop stop words.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
