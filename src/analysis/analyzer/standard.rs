//! Standard analyzer used by the index builder and the query side.
//!
//! # Pipeline
//!
//! 1. TextTokenizer (whitespace chunks, letters and hyphens only)
//! 2. LowercaseFilter (optional, on by default)
//! 3. MinLengthFilter (2 characters by default)
//! 4. StopFilter (optional, off by default)
//!
//! Positions are renumbered after filtering, so a term's position is its
//! ordinal among the terms that survived.
//!
//! # Examples
//!
//! ```
//! use boolsearch::analysis::analyzer::Analyzer;
//! use boolsearch::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Back in Black, I hit the sack").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "back");
//! assert_eq!(tokens[2].text, "black");
//! assert_eq!(tokens[3].text, "hit");
//! assert_eq!(tokens[3].position, 3);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter, MinLengthFilter, StopFilter};
use crate::analysis::tokenizer::{TextTokenizer, Tokenizer};
use crate::error::{BoolSearchError, Result};

/// Options for the standard analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Shortest term, in characters, that is kept.
    pub min_token_length: usize,
    /// Lower-case terms before indexing.
    pub lowercase: bool,
    /// Drop common function words.
    pub remove_stop_words: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            min_token_length: 2,
            lowercase: true,
            remove_stop_words: false,
        }
    }
}

/// A standard analyzer with configurable filters.
#[derive(Clone)]
pub struct StandardAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    config: AnalyzerConfig,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create a standard analyzer from explicit options.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        if config.min_token_length == 0 {
            return Err(BoolSearchError::invalid_config(
                "min_token_length must be at least 1",
            ));
        }

        let tokenizer = Arc::new(TextTokenizer::new()?);
        let mut filters: Vec<Arc<dyn Filter>> = Vec::new();
        if config.lowercase {
            filters.push(Arc::new(LowercaseFilter::new()));
        }
        filters.push(Arc::new(MinLengthFilter::new(config.min_token_length)));
        if config.remove_stop_words {
            filters.push(Arc::new(StopFilter::new()));
        }

        Ok(StandardAnalyzer {
            tokenizer,
            filters,
            config,
        })
    }

    /// The options this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|x| x.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(Box::new(
            tokens
                .enumerate()
                .map(|(position, token)| token.with_position(position)),
        ))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
