//! Query evaluation over the inverted index.
//!
//! Boolean operators work on each term's document-id list as a sorted set
//! and are computed by linear merges. Phrase queries come in two flavors:
//! [`QueryEvaluator::phrase`] only requires the terms to co-occur in a
//! document, while [`QueryEvaluator::phrase_exact`] also walks the position
//! lists and requires the terms to be adjacent and in order.

pub mod boolean;
pub mod evaluator;
pub mod set_ops;

pub use boolean::{BooleanQuery, SearchMode};
pub use evaluator::QueryEvaluator;
pub use set_ops::{difference_sorted, intersect_sorted, union_sorted};
