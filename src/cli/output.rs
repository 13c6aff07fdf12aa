//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BoolSearchArgs, OutputFormat};
use crate::document::DocId;
use crate::error::Result;
use crate::index::IndexStats;
use crate::query::SearchMode;

/// Result structure for index builds.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub index_file: String,
    pub documents: usize,
    pub terms: usize,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub mode: SearchMode,
    pub doc_ids: Vec<DocId>,
    pub total_hits: usize,
    pub duration_ms: u64,
}

/// A term and how often it occurs.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub doc_frequency: usize,
    pub total_frequency: usize,
}

/// Index statistics report.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: IndexStats,
    pub index_size_bytes: u64,
    pub top_terms: Vec<TermFrequency>,
}

/// Result structure for HTML parsing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub path: String,
    pub title: String,
    pub word_count: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,
}

/// One query run by the demo.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoQuery {
    pub description: String,
    pub doc_ids: Vec<DocId>,
}

/// Result structure for the demo.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoReport {
    pub documents: Vec<(DocId, String)>,
    pub terms: usize,
    pub queries: Vec<DemoQuery>,
}

/// Human-readable rendering of a command result.
///
/// The default prints every top-level field as `key: value`.
pub trait HumanOutput: Serialize {
    fn print_human(&self) -> Result<()> {
        let value = serde_json::to_value(self)?;
        output_generic_human(&value);
        Ok(())
    }
}

impl HumanOutput for BuildResult {}

impl HumanOutput for ParsedDocument {
    fn print_human(&self) -> Result<()> {
        println!("File: {}", self.path);
        println!("Title: {}", self.title);
        println!("Words: {}", self.word_count);
        println!();
        println!("{}", self.content);

        if let Some(terms) = &self.terms {
            println!();
            println!("Terms ({}): {}", terms.len(), terms.join(" "));
        }
        Ok(())
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self) -> Result<()> {
        println!("Search Results:");
        println!("═══════════════");
        println!("Query: {}", self.query);

        if self.doc_ids.is_empty() {
            println!("No matching documents");
        } else {
            println!("Documents: {}", format_doc_ids(&self.doc_ids));
        }

        println!();
        println!("Total hits: {}", self.total_hits);
        println!("Search time: {}ms", self.duration_ms);
        Ok(())
    }
}

impl HumanOutput for StatsReport {
    fn print_human(&self) -> Result<()> {
        println!("Index Statistics:");
        println!("════════════════");
        println!("Total documents: {}", self.stats.doc_count);
        println!("Unique terms: {}", self.stats.term_count);
        println!("Total postings: {}", self.stats.total_postings);
        println!("Total positions: {}", self.stats.total_positions);
        println!(
            "Average postings per term: {:.2}",
            self.stats.avg_postings_per_term
        );
        println!("Largest posting list: {}", self.stats.max_postings_per_term);
        println!("Index size: {}", format_bytes(self.index_size_bytes));

        if !self.top_terms.is_empty() {
            println!();
            println!("Top Terms:");
            println!("──────────");
            for (rank, term) in self.top_terms.iter().enumerate() {
                println!(
                    "{:>3}. {:<20} {} docs, {} occurrences",
                    rank + 1,
                    term.term,
                    term.doc_frequency,
                    term.total_frequency
                );
            }
        }
        Ok(())
    }
}

impl HumanOutput for DemoReport {
    fn print_human(&self) -> Result<()> {
        println!("Documents:");
        println!("──────────");
        for (id, title) in &self.documents {
            println!("{id:>3}: {title}");
        }
        println!();
        println!("Indexed {} unique terms", self.terms);

        println!();
        println!("Queries:");
        println!("────────");
        for query in &self.queries {
            println!("{:<28} → {}", query.description, format_doc_ids(&query.doc_ids));
        }
        Ok(())
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &BoolSearchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &BoolSearchArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    result.print_human()
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BoolSearchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        serde_json::Value::Object(_) => value.to_string(),
    }
}

/// Format a list of document ids, or `(none)` when empty.
pub fn format_doc_ids(doc_ids: &[DocId]) -> String {
    if doc_ids.is_empty() {
        return "(none)".to_string();
    }

    let ids: Vec<String> = doc_ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", ids.join(", "))
}

/// Format bytes in human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
