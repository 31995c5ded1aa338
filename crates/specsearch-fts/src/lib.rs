//! Full-text indexing and query core for Specsearch (Tantivy backend).
//!
//! This crate turns a read-only specification tree into a persistent,
//! searchable index and answers free-text queries against it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      specsearch-fts                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  document   SpecDocument / ScenarioDocument (flat records)  │
//! │  schema     SpecSchema (fixed mapping, en_stem tokenizer)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  store      IndexStore (open-or-create, open-existing)     │
//! │  indexer    index_collection (concurrent pass, IndexStats) │
//! ├─────────────────────────────────────────────────────────────┤
//! │  search     SpecSearcher (match query, highlights, facets) │
//! │  config     SearchConfig                                    │
//! │  stopwords  StopwordFilter                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use specsearch_core::ProjectRoot;
//! use specsearch_fts::{IndexStore, SearchConfig, SearchRequest, SpecSearcher, index_collection};
//!
//! // Indexing pass
//! let root = ProjectRoot::resolve(None)?;
//! let store = IndexStore::open_or_create(&root.index_path())?;
//! let stats = index_collection(store, &collection, &root).await?;
//! println!("indexed {} documents", stats.documents_indexed);
//!
//! // Querying
//! let searcher = SpecSearcher::open(&root, SearchConfig::default())?;
//! let results = searcher.search(&SearchRequest::new("customer login"))?;
//! for hit in results.hits {
//!     println!("{:.2} {} {}", hit.score, hit.id, hit.heading);
//! }
//! ```

pub mod config;
pub mod document;
pub mod indexer;
pub mod schema;
pub mod search;
pub mod stopwords;
pub mod store;

// Re-exports
pub use config::SearchConfig;
pub use document::{ScenarioDocument, SpecDocument, scenario_document, spec_document};
pub use indexer::{IndexStats, index_collection};
pub use schema::SpecSchema;
pub use search::{SearchHit, SearchRequest, SearchResults, SpecSearcher, TagCount};
pub use stopwords::StopwordFilter;
pub use store::{IndexStore, index_exists};
