//! Specsearch CLI.
//!
//! - `specsearch index --collection specs.json`: build or refresh the
//!   persistent index from a specification-collection snapshot
//! - `specsearch search <query>`: ranked, highlighted, faceted search

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use specsearch_core::ProjectRoot;
use specsearch_fts::{IndexStore, SearchConfig, SearchRequest, SpecSearcher, index_collection};
use specsearch_model::{SpecCollection, Specification};
use tracing_subscriber::EnvFilter;

/// Specsearch - full-text search over test-specification collections
#[derive(Parser, Debug)]
#[command(name = "specsearch")]
#[command(about = "Index and search test-specification collections", long_about = None)]
struct Args {
    /// Project root (defaults to $SPECSEARCH_PROJECT_ROOT, then a `.gauge`
    /// marker found walking up from the working directory)
    #[arg(short = 'r', long, global = true)]
    project_root: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build or refresh the search index
    Index {
        /// JSON snapshot of the specification collection
        #[arg(short, long)]
        collection: PathBuf,
    },

    /// Search indexed specifications
    Search {
        /// Free-text query, matched against headings
        query: String,

        /// Only return documents carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of hits to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let root = ProjectRoot::resolve(args.project_root.as_deref())?;

    match args.command {
        Command::Index { collection } => run_index(&root, &collection).await,
        Command::Search {
            query,
            tag,
            limit,
            json,
        } => run_search(&root, query, tag, limit, json),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run_index(root: &ProjectRoot, collection_path: &Path) -> anyhow::Result<()> {
    let file = File::open(collection_path)
        .with_context(|| format!("cannot open {}", collection_path.display()))?;
    let specs: Vec<Specification> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse {}", collection_path.display()))?;
    let collection = SpecCollection::new(specs);

    let store = IndexStore::open_or_create(&root.index_path())?;
    let stats = index_collection(store, &collection, root).await?;

    println!(
        "Indexed {}/{} documents ({} specifications, {} scenarios, {} skipped)",
        stats.documents_indexed,
        stats.total_units,
        stats.specifications,
        stats.scenarios,
        stats.documents_skipped
    );
    Ok(())
}

fn run_search(
    root: &ProjectRoot,
    query: String,
    tag: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let searcher = SpecSearcher::open(root, SearchConfig::default())?;
    let request = SearchRequest { query, tag, limit };
    let results = searcher.search(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.hits.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    println!("{} matching documents", results.total);
    for (rank, hit) in results.hits.iter().enumerate() {
        let line = hit.fragment.as_deref().unwrap_or(&hit.heading);
        println!(
            "{:>3}. {:.3}  {} [{}]",
            rank + 1,
            hit.score,
            hit.id,
            hit.doc_type
        );
        println!("     {line}");
    }

    if !results.tag_counts.is_empty() {
        println!("Tags:");
        for tag_count in &results.tag_counts {
            println!("  {} ({})", tag_count.tag, tag_count.count);
        }
    }
    Ok(())
}
