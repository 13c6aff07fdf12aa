//! Analyzers combining a tokenizer with token filters.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod standard;

pub use analyzer::Analyzer;
pub use standard::{AnalyzerConfig, StandardAnalyzer};
