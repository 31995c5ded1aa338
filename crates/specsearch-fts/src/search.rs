//! Query execution: ranked, highlighted, faceted search.
//!
//! Queries open the index, never create it: an absent index means
//! indexing has not been performed yet, and the caller is told so instead
//! of getting a silent empty result.
//!
//! The query surface is deliberately small: the user's text becomes a
//! match query over the heading field (leniently parsed, so stray syntax
//! is dropped rather than exposed as a query language), every request also
//! carries a facet over the tag field, and an optional exact-tag filter
//! intersects the match. Ranking, highlighting, and facet computation are
//! the engine's.

use std::path::Path;

use serde::Serialize;
use specsearch_core::{Error, ProjectRoot, Result};
use tantivy::collector::{Count, FacetCollector, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::snippet::SnippetGenerator;
use tantivy::{IndexReader, TantivyDocument, Term};

use crate::config::SearchConfig;
use crate::schema::{TAG_FACET_ROOT, tag_facet};
use crate::stopwords::StopwordFilter;
use crate::store::IndexStore;

/// A search request.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Free-text query, matched against headings.
    pub query: String,
    /// Exact tag filter (keyword semantics, never tokenized).
    pub tag: Option<String>,
    /// Override for the configured hit limit.
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Request with query text only.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Document identifier.
    pub id: String,
    /// `spec` or `scenario`.
    pub doc_type: String,
    /// Heading text as stored.
    pub heading: String,
    /// Engine relevance score.
    pub score: f32,
    /// Highlighted heading fragment (`<b>` markup), when the match
    /// produced one.
    pub fragment: Option<String>,
}

/// Count of one tag value among matching documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// Tag value.
    pub tag: String,
    /// Matching documents carrying the tag.
    pub count: u64,
}

/// Ranked hits plus the tag facet summary.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Hits in engine relevance order.
    pub hits: Vec<SearchHit>,
    /// Total matching documents (may exceed `hits.len()`).
    pub total: usize,
    /// Most frequent tag values among matches, most frequent first.
    pub tag_counts: Vec<TagCount>,
}

/// Read-side handle over an existing specification index.
pub struct SpecSearcher {
    store: IndexStore,
    reader: IndexReader,
    stopwords: StopwordFilter,
    config: SearchConfig,
}

impl SpecSearcher {
    /// Open the project's index for querying.
    pub fn open(root: &ProjectRoot, config: SearchConfig) -> Result<Self> {
        Self::open_at(&root.index_path(), config)
    }

    /// Open the index at an explicit path for querying.
    pub fn open_at(path: &Path, config: SearchConfig) -> Result<Self> {
        Self::from_store(IndexStore::open_existing(path)?, config)
    }

    /// Wrap an already-opened store.
    pub fn from_store(store: IndexStore, config: SearchConfig) -> Result<Self> {
        let reader = store.reader()?;
        let stopwords = StopwordFilter::new(&config);
        Ok(Self {
            store,
            reader,
            stopwords,
            config,
        })
    }

    /// Execute a search: ranked hits, heading highlights, top tag facets.
    ///
    /// A query that matches nothing returns empty hits and an empty facet
    /// summary, not an error.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let schema = self.store.schema();
        let searcher = self.reader.searcher();

        let text = self.stopwords.filter(&request.query);
        let parser = QueryParser::for_index(self.store.index(), vec![schema.heading]);
        let (heading_query, dropped) = parser.parse_query_lenient(&text);
        for err in &dropped {
            log::debug!("ignoring unparsable query input: {err:?}");
        }

        let query: Box<dyn Query> = match &request.tag {
            Some(tag) => {
                let tag_query: Box<dyn Query> = Box::new(TermQuery::new(
                    Term::from_facet(schema.tags, &tag_facet(tag)),
                    IndexRecordOption::Basic,
                ));
                Box::new(BooleanQuery::from(vec![
                    (Occur::Must, heading_query),
                    (Occur::Must, tag_query),
                ]))
            }
            None => heading_query,
        };

        let limit = request.limit.unwrap_or(self.config.limit).max(1);
        let mut facet_collector = FacetCollector::for_field("tags");
        facet_collector.add_facet(TAG_FACET_ROOT);

        let (top_docs, total, facet_counts) = searcher
            .search(
                &*query,
                &(
                    TopDocs::with_limit(limit).order_by_score(),
                    Count,
                    facet_collector,
                ),
            )
            .map_err(|e| Error::index(format!("search failed: {e}")))?;

        let mut highlighter = SnippetGenerator::create(&searcher, &*query, schema.heading)
            .map_err(|e| Error::index(format!("failed to build highlighter: {e}")))?;
        highlighter.set_max_num_chars(self.config.snippet_length);

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| Error::index(format!("failed to load hit: {e}")))?;

            let snippet = highlighter.snippet_from_doc(&doc);
            let fragment = if snippet.fragment().trim().is_empty() {
                None
            } else {
                Some(snippet.to_html())
            };

            hits.push(SearchHit {
                id: text_field(&doc, schema.id),
                doc_type: text_field(&doc, schema.doc_type),
                heading: text_field(&doc, schema.heading),
                score,
                fragment,
            });
        }

        let mut tag_counts: Vec<TagCount> = facet_counts
            .get(TAG_FACET_ROOT)
            .filter_map(|(facet, count)| {
                let path = facet.to_string();
                let tag = path.split('/').next_back()?;
                if tag.is_empty() {
                    return None;
                }
                Some(TagCount {
                    tag: tag.to_string(),
                    count,
                })
            })
            .collect();
        tag_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        tag_counts.truncate(self.config.facet_count);

        Ok(SearchResults {
            hits,
            total,
            tag_counts,
        })
    }
}

fn text_field(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

impl std::fmt::Debug for SpecSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecSearcher")
            .field("store", &self.store)
            .field("stopwords", &self.stopwords)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use specsearch_model::{Heading, Scenario, SpecCollection, Specification, Step};

    use super::*;
    use crate::indexer::index_collection;

    fn tagged_scenario(name: &str, line_no: u32, tags: &[&str]) -> Scenario {
        Scenario {
            heading: Heading::new(name, line_no),
            steps: vec![Step::new("Do the thing", line_no + 1)],
            comments: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample_collection() -> SpecCollection {
        SpecCollection::new(vec![
            Specification {
                heading: Heading::new("Search specifications", 1),
                file_name: PathBuf::from("/project/specs/search.spec"),
                context_steps: vec![Step::new("Open the tool", 3)],
                comments: vec![],
                tags: vec!["smoke-test".to_string()],
                scenarios: vec![
                    tagged_scenario("Searching by heading", 7, &["smoke-test"]),
                    tagged_scenario("Search result ordering", 14, &["regression"]),
                ],
            },
            Specification {
                heading: Heading::new("Billing rules", 1),
                file_name: PathBuf::from("/project/specs/billing.spec"),
                context_steps: vec![],
                comments: vec![],
                tags: vec!["billing".to_string()],
                scenarios: vec![],
            },
        ])
    }

    async fn build_index(path: &Path) {
        let root = ProjectRoot::new("/project");
        let store = IndexStore::open_or_create(path).unwrap();
        let stats = index_collection(store, &sample_collection(), &root)
            .await
            .unwrap();
        assert_eq!(stats.documents_in_index, 4);
    }

    #[tokio::test]
    async fn test_search_matches_heading_with_stemming() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let results = searcher.search(&SearchRequest::new("search")).unwrap();

        // "Search specifications", "Searching by heading", "Search result ordering"
        assert_eq!(results.total, 3);
        assert!(results.hits.iter().any(|h| h.id == "specs/search.spec"));
        assert!(
            results
                .hits
                .iter()
                .any(|h| h.id == "specs/search.spec:7" && h.doc_type == "scenario")
        );
    }

    #[tokio::test]
    async fn test_free_text_does_not_match_tag_values() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        // "smoke" appears only inside the tag value "smoke-test"
        let results = searcher.search(&SearchRequest::new("smoke")).unwrap();

        assert!(results.hits.is_empty());
        assert_eq!(results.total, 0);
        assert!(results.tag_counts.is_empty());
    }

    #[tokio::test]
    async fn test_tag_facet_counts() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let results = searcher.search(&SearchRequest::new("search")).unwrap();

        assert_eq!(
            results.tag_counts,
            vec![
                TagCount {
                    tag: "smoke-test".to_string(),
                    count: 2
                },
                TagCount {
                    tag: "regression".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_exact_tag_filter() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let request = SearchRequest {
            query: "search".to_string(),
            tag: Some("regression".to_string()),
            limit: None,
        };
        let results = searcher.search(&request).unwrap();

        assert_eq!(results.total, 1);
        assert_eq!(results.hits[0].id, "specs/search.spec:14");
    }

    #[tokio::test]
    async fn test_highlight_fragment() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let results = searcher.search(&SearchRequest::new("billing")).unwrap();

        assert_eq!(results.total, 1);
        let fragment = results.hits[0].fragment.as_deref().unwrap();
        assert!(fragment.contains("<b>"), "no highlight in {fragment}");
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let results = searcher
            .search(&SearchRequest::new("quasar nebula"))
            .unwrap();

        assert!(results.hits.is_empty());
        assert_eq!(results.total, 0);
        assert!(results.tag_counts.is_empty());
    }

    #[tokio::test]
    async fn test_limit_caps_hits_not_total() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");
        build_index(&path).await;

        let searcher = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap();
        let request = SearchRequest {
            query: "search".to_string(),
            tag: None,
            limit: Some(1),
        };
        let results = searcher.search(&request).unwrap();

        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.total, 3);
    }

    #[tokio::test]
    async fn test_open_without_index_reports_not_indexed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");

        let err = SpecSearcher::open_at(&path, SearchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::IndexNotFound { .. }));
    }
}
