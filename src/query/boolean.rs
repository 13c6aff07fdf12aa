//! Boolean queries built from a query string and a search mode.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::document::DocId;
use crate::error::{BoolSearchError, Result};
use crate::query::evaluator::QueryEvaluator;

/// How the terms of a query string are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// A single term is looked up; several terms must all occur.
    #[default]
    Auto,
    /// A single term.
    Term,
    /// Every term must occur.
    And,
    /// Any term may occur.
    Or,
    /// Documents without the single term.
    Not,
    /// Every term occurs somewhere in the document.
    Phrase,
    /// The terms occur next to each other, in order.
    ExactPhrase,
}

/// A parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanQuery {
    Term(String),
    And(Vec<String>),
    Or(Vec<String>),
    Not(String),
    Phrase(Vec<String>),
    ExactPhrase(Vec<String>),
}

impl BooleanQuery {
    /// Build a query from the whitespace-separated terms of `text`, used as
    /// they are.
    pub fn from_text(text: &str, mode: SearchMode) -> Result<Self> {
        let terms = text.split_whitespace().map(str::to_string).collect();
        Self::from_terms(terms, mode)
    }

    /// Build a query from the terms `analyzer` produces for `text`, so they
    /// match how documents were indexed.
    pub fn from_text_analyzed(
        text: &str,
        mode: SearchMode,
        analyzer: &dyn Analyzer,
    ) -> Result<Self> {
        Self::from_terms(analyzer.terms(text)?, mode)
    }

    /// Build a query from already normalized terms.
    pub fn from_terms(mut terms: Vec<String>, mode: SearchMode) -> Result<Self> {
        let single = |terms: &mut Vec<String>| match terms.len() {
            1 => Ok(terms.remove(0)),
            0 => Err(BoolSearchError::query("query has no searchable terms")),
            n => Err(BoolSearchError::query(format!(
                "{mode:?} mode takes a single term, got {n}"
            ))),
        };

        let query = match mode {
            SearchMode::Auto if terms.len() > 1 => BooleanQuery::And(terms),
            SearchMode::Auto | SearchMode::Term => BooleanQuery::Term(single(&mut terms)?),
            SearchMode::Not => BooleanQuery::Not(single(&mut terms)?),
            SearchMode::And | SearchMode::Or if terms.is_empty() => {
                return Err(BoolSearchError::query("query has no searchable terms"));
            }
            SearchMode::And => BooleanQuery::And(terms),
            SearchMode::Or => BooleanQuery::Or(terms),
            SearchMode::Phrase => BooleanQuery::Phrase(terms),
            SearchMode::ExactPhrase => BooleanQuery::ExactPhrase(terms),
        };
        Ok(query)
    }

    /// The mode this query was built for, with [`SearchMode::Auto`] resolved.
    pub fn mode(&self) -> SearchMode {
        match self {
            BooleanQuery::Term(_) => SearchMode::Term,
            BooleanQuery::And(_) => SearchMode::And,
            BooleanQuery::Or(_) => SearchMode::Or,
            BooleanQuery::Not(_) => SearchMode::Not,
            BooleanQuery::Phrase(_) => SearchMode::Phrase,
            BooleanQuery::ExactPhrase(_) => SearchMode::ExactPhrase,
        }
    }

    /// Terms of the query in order.
    pub fn terms(&self) -> &[String] {
        match self {
            BooleanQuery::Term(term) | BooleanQuery::Not(term) => std::slice::from_ref(term),
            BooleanQuery::And(terms)
            | BooleanQuery::Or(terms)
            | BooleanQuery::Phrase(terms)
            | BooleanQuery::ExactPhrase(terms) => terms,
        }
    }

    /// Evaluate the query. `all_docs` is the universe used by NOT.
    pub fn evaluate(&self, evaluator: &QueryEvaluator<'_>, all_docs: &[DocId]) -> Vec<DocId> {
        match self {
            BooleanQuery::Term(term) => evaluator.lookup(term).to_vec(),
            BooleanQuery::And(terms) => evaluator.and_all(terms),
            BooleanQuery::Or(terms) => evaluator.or_all(terms),
            BooleanQuery::Not(term) => evaluator.not(term, all_docs),
            BooleanQuery::Phrase(terms) => evaluator.phrase_terms(terms),
            BooleanQuery::ExactPhrase(terms) => evaluator.phrase_exact_terms(terms),
        }
    }
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanQuery::Term(term) => write!(f, "{term}"),
            BooleanQuery::And(terms) => write!(f, "{}", terms.join(" AND ")),
            BooleanQuery::Or(terms) => write!(f, "{}", terms.join(" OR ")),
            BooleanQuery::Not(term) => write!(f, "NOT {term}"),
            BooleanQuery::Phrase(terms) => write!(f, "\"{}\"", terms.join(" ")),
            BooleanQuery::ExactPhrase(terms) => write!(f, "=\"{}\"", terms.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::standard::StandardAnalyzer;
    use crate::index::IndexBuilder;

    #[test]
    fn test_from_text() {
        let query = BooleanQuery::from_text("black  back", SearchMode::And).unwrap();
        assert_eq!(query, BooleanQuery::And(vec!["black".into(), "back".into()]));
        assert_eq!(query.to_string(), "black AND back");
        assert_eq!(query.mode(), SearchMode::And);

        let query = BooleanQuery::from_text("rock", SearchMode::Not).unwrap();
        assert_eq!(query.to_string(), "NOT rock");
        assert_eq!(query.terms(), &["rock".to_string()]);
    }

    #[test]
    fn test_auto_mode_follows_term_count() {
        let query = BooleanQuery::from_text("black", SearchMode::Auto).unwrap();
        assert_eq!(query, BooleanQuery::Term("black".into()));
        assert_eq!(query.mode(), SearchMode::Term);

        let query = BooleanQuery::from_text("black back", SearchMode::Auto).unwrap();
        assert_eq!(query, BooleanQuery::And(vec!["black".into(), "back".into()]));
        assert_eq!(query.mode(), SearchMode::And);

        assert!(BooleanQuery::from_text("", SearchMode::Auto).is_err());
    }

    #[test]
    fn test_invalid_term_counts() {
        assert!(BooleanQuery::from_text("", SearchMode::Term).is_err());
        assert!(BooleanQuery::from_text("a b", SearchMode::Term).is_err());
        assert!(BooleanQuery::from_text("a b", SearchMode::Not).is_err());
        assert!(BooleanQuery::from_text(" ", SearchMode::Or).is_err());

        // A short phrase is valid and simply matches nothing.
        let query = BooleanQuery::from_text("back", SearchMode::Phrase).unwrap();
        assert_eq!(query, BooleanQuery::Phrase(vec!["back".into()]));
    }

    #[test]
    fn test_analyzed_query_matches_index() {
        let mut builder = IndexBuilder::with_default_analyzer().unwrap();
        builder.add_text(1, "Back in Black").unwrap();
        builder.add_text(2, "Queen").unwrap();
        let store = builder.finish();
        let evaluator = QueryEvaluator::new(&store);

        let analyzer = StandardAnalyzer::new().unwrap();
        let query =
            BooleanQuery::from_text_analyzed("BLACK, Back!", SearchMode::And, &analyzer).unwrap();
        assert_eq!(query.evaluate(&evaluator, store.doc_ids()), vec![1]);

        let query = BooleanQuery::from_text_analyzed("black", SearchMode::Not, &analyzer).unwrap();
        assert_eq!(query.evaluate(&evaluator, store.doc_ids()), vec![2]);

        let query =
            BooleanQuery::from_text_analyzed("back in", SearchMode::ExactPhrase, &analyzer)
                .unwrap();
        assert_eq!(query.evaluate(&evaluator, store.doc_ids()), vec![1]);
    }
}
