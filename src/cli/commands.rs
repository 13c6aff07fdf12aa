//! Command implementations for the boolsearch CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{Document, DocumentCollection, HtmlParser, load_documents_from_dir};
use crate::error::{BoolSearchError, Result};
use crate::index::{IndexBuilder, IndexConfig, PostingStore};
use crate::query::{BooleanQuery, QueryEvaluator, SearchMode};

/// Pages indexed by the `demo` command.
const DEMO_PAGES: &[&str] = &[
    "<!DOCTYPE html>
<html>
<head><title>Rock Music Collection</title></head>
<body>
<h1>AC/DC - Back in Black</h1>
<div class=\"lyrics\">Back in black I hit the sack
I've been too long I'm glad to be back</div>
<p><strong>Genre:</strong> Hard Rock</p>
<p><strong>Year:</strong> 1980</p>
</body>
</html>",
    "<!DOCTYPE html>
<html lang=\"ru\">
<head><title>Queen - Bohemian Rhapsody</title></head>
<body>
<h1>Bohemian Rhapsody</h1>
<p>Легендарная песня группы <em>Queen</em> из альбома <strong>A Night at the Opera</strong></p>
<p>Жанры: Прогрессив-рок, Хард-рок</p>
</body>
</html>",
    "<!DOCTYPE html>
<html>
<head><title>Pop Music Hits</title></head>
<body>
<h1>Michael Jackson - Thriller</h1>
<p>The best-selling album of all time</p>
<ul>
<li>Genre: Pop, Funk, Disco</li>
<li>Year: 1982</li>
</ul>
</body>
</html>",
];

/// Execute a CLI command.
pub fn execute_command(args: BoolSearchArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Build(build_args) => build_index(build_args, &config, &args),
        Command::Search(search_args) => search_index(search_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
        Command::Parse(parse_args) => parse_document(parse_args, &config, &args),
        Command::Demo => run_demo(&config, &args),
    }
}

/// Load the index configuration named on the command line, or the default.
fn load_config(args: &BoolSearchArgs) -> Result<IndexConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            IndexConfig::from_json_file(path)
        }
        None => Ok(IndexConfig::default()),
    }
}

/// Build an index from a directory of HTML files.
fn build_index(args: &BuildArgs, config: &IndexConfig, cli_args: &BoolSearchArgs) -> Result<()> {
    let start_time = Instant::now();

    let collection = load_documents_from_dir(&args.docs_dir, args.first_id)?;
    if collection.is_empty() {
        return Err(BoolSearchError::not_found(format!(
            "HTML documents in {}",
            args.docs_dir.display()
        )));
    }

    let store = IndexBuilder::build(config, &collection)?;
    let bytes_written = store.save(&args.index_file, &config.storage)?;

    output_result(
        "Index built successfully",
        &BuildResult {
            index_file: args.index_file.to_string_lossy().to_string(),
            documents: collection.len(),
            terms: store.len(),
            bytes_written,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Search an index.
fn search_index(args: &SearchArgs, config: &IndexConfig, cli_args: &BoolSearchArgs) -> Result<()> {
    let results = run_search(args, config)?;
    output_result("", &results, cli_args)
}

fn run_search(args: &SearchArgs, config: &IndexConfig) -> Result<SearchResults> {
    let store = PostingStore::load(&args.index_file, &config.storage)?;

    let query = if args.raw {
        BooleanQuery::from_text(&args.query, args.mode)?
    } else {
        let analyzer = StandardAnalyzer::with_config(config.analyzer.clone())?;
        BooleanQuery::from_text_analyzed(&args.query, args.mode, &analyzer)?
    };
    debug!("Evaluating {query}");

    let universe = match &args.docs_dir {
        Some(docs_dir) => load_documents_from_dir(docs_dir, args.first_id)?.ids(),
        None => store.doc_ids().to_vec(),
    };

    let start_time = Instant::now();
    let mut doc_ids = query.evaluate(&QueryEvaluator::new(&store), &universe);
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let total_hits = doc_ids.len();
    if args.limit > 0 {
        doc_ids.truncate(args.limit);
    }

    Ok(SearchResults {
        query: query.to_string(),
        mode: query.mode(),
        doc_ids,
        total_hits,
        duration_ms,
    })
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, config: &IndexConfig, cli_args: &BoolSearchArgs) -> Result<()> {
    let store = PostingStore::load(&args.index_file, &config.storage)?;
    let index_size_bytes = fs::metadata(&args.index_file)?.len();

    let top_terms = store
        .entries_by_doc_frequency()
        .into_iter()
        .take(args.top)
        .map(|entry| TermFrequency {
            term: entry.term().to_string(),
            doc_frequency: entry.doc_frequency(),
            total_frequency: entry.total_frequency(),
        })
        .collect();

    output_result(
        "",
        &StatsReport {
            stats: store.stats(),
            index_size_bytes,
            top_terms,
        },
        cli_args,
    )
}

/// Show what the preprocessing and analysis make of one HTML file.
fn parse_document(args: &ParseArgs, config: &IndexConfig, cli_args: &BoolSearchArgs) -> Result<()> {
    let document = read_html(&args.html_file)?;

    let terms = if args.terms {
        let analyzer = StandardAnalyzer::with_config(config.analyzer.clone())?;
        Some(analyzer.terms(&document.content)?)
    } else {
        None
    };

    output_result(
        "",
        &ParsedDocument {
            path: args.html_file.to_string_lossy().to_string(),
            title: document.title,
            word_count: document.word_count,
            content: document.content,
            terms,
        },
        cli_args,
    )
}

fn read_html(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)?;
    let parser = HtmlParser::new()?;
    Ok(parser
        .parse(&String::from_utf8_lossy(&bytes), 1)
        .with_path(path))
}

/// Index the built-in pages and run a query of every kind against them.
fn run_demo(config: &IndexConfig, cli_args: &BoolSearchArgs) -> Result<()> {
    let parser = HtmlParser::new()?;
    let mut collection = DocumentCollection::with_capacity(DEMO_PAGES.len());
    for (id, html) in (1..).zip(DEMO_PAGES) {
        collection.add(parser.parse(html, id))?;
    }

    let store = IndexBuilder::build(config, &collection)?;
    let evaluator = QueryEvaluator::new(&store);
    let analyzer = StandardAnalyzer::with_config(config.analyzer.clone())?;
    info!("Demo index holds {} terms", store.len());

    let queries = [
        ("rock", SearchMode::Term),
        ("black back", SearchMode::And),
        ("queen jackson", SearchMode::Or),
        ("black", SearchMode::Not),
        ("back in", SearchMode::Phrase),
        ("in back", SearchMode::ExactPhrase),
        ("back in", SearchMode::ExactPhrase),
    ]
    .into_iter()
    .map(|(text, mode)| -> Result<DemoQuery> {
        let query = BooleanQuery::from_text_analyzed(text, mode, &analyzer)?;
        Ok(DemoQuery {
            description: query.to_string(),
            doc_ids: query.evaluate(&evaluator, store.doc_ids()),
        })
    })
    .collect::<Result<Vec<_>>>()?;

    output_result(
        "Demo index over built-in documents",
        &DemoReport {
            documents: collection
                .iter()
                .map(|doc| (doc.id, doc.title.clone()))
                .collect(),
            terms: store.len(),
            queries,
        },
        cli_args,
    )
}
