//! Concurrent indexing pass.
//!
//! One unit of work per specification document and one per scenario
//! document, all spawned up front on a [`JoinSet`]; draining the set is the
//! completion barrier the orchestrator blocks on before committing and
//! closing the index. Total units are computed before spawning so
//! completion is tracked precisely even though scenario counts differ per
//! specification.
//!
//! Tantivy's `IndexWriter` queues inserts internally and accepts them
//! through `&self`, so units insert under a shared read guard; only the
//! final commit needs the write side. Per-document failures are logged and
//! the document skipped; they never abort the remaining units. Failure to
//! create the writer or to commit aborts the whole pass.

use std::sync::Arc;

use serde::Serialize;
use specsearch_core::{Error, ProjectRoot, Result};
use specsearch_model::SpecCollection;
use tantivy::{IndexWriter, TantivyDocument, Term};
use tokio::sync::RwLock;
use tokio::task::JoinSet;

use crate::document::{SpecDocument, scenario_document};
use crate::schema::SpecSchema;
use crate::store::IndexStore;

/// Aggregate statistics for one indexing pass.
///
/// `documents_indexed + documents_skipped == total_units` once the pass
/// completes; skipped units were logged, never silently dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    /// Specifications in the collection.
    pub specifications: usize,
    /// Scenarios across all specifications.
    pub scenarios: usize,
    /// Units of work launched or accounted for (specs + scenarios).
    pub total_units: usize,
    /// Documents successfully handed to the index.
    pub documents_indexed: usize,
    /// Documents skipped after a logged failure.
    pub documents_skipped: usize,
    /// Searchable documents in the index after the final commit.
    pub documents_in_index: u64,
}

enum UnitOutcome {
    Indexed,
    Skipped,
}

/// Index every specification and scenario in the collection, then commit
/// and close the index.
///
/// The store is consumed: when this returns, the pass is flushed and the
/// writer released. Completion order across units is unspecified; the only
/// guarantee is that every unit has resolved before the commit.
pub async fn index_collection(
    store: IndexStore,
    collection: &SpecCollection,
    root: &ProjectRoot,
) -> Result<IndexStats> {
    let mut stats = IndexStats {
        specifications: collection.size(),
        scenarios: collection.scenario_count(),
        total_units: collection.unit_count(),
        ..Default::default()
    };

    log::info!(
        "indexing {} specifications ({} units of work)",
        stats.specifications,
        stats.total_units
    );

    let writer = Arc::new(RwLock::new(store.writer()?));
    let schema = store.schema().clone();
    let mut units: JoinSet<UnitOutcome> = JoinSet::new();

    for spec in collection.specs() {
        // Scenario ids are prefixed with the spec id, so a failed
        // derivation invalidates the whole unit group: report and skip,
        // never index under a wrong key.
        let spec_id = match root.relative_id(&spec.file_name) {
            Ok(id) => id,
            Err(e) => {
                log::error!("{e}");
                stats.documents_skipped += 1 + spec.scenarios.len();
                continue;
            }
        };

        log::info!("indexing {spec_id}");

        {
            let spec = Arc::clone(spec);
            let writer = Arc::clone(&writer);
            let schema = schema.clone();
            let spec_id = spec_id.clone();
            units.spawn(async move {
                let doc = SpecDocument::build(&spec, spec_id);
                insert(&writer, &schema, &doc.id, doc.to_tantivy(&schema)).await
            });
        }

        for scenario_idx in 0..spec.scenarios.len() {
            let spec = Arc::clone(spec);
            let writer = Arc::clone(&writer);
            let schema = schema.clone();
            let spec_id = spec_id.clone();
            units.spawn(async move {
                let doc = scenario_document(&spec.scenarios[scenario_idx], &spec_id);
                insert(&writer, &schema, &doc.id, doc.to_tantivy(&schema)).await
            });
        }
    }

    // Completion barrier: every launched unit resolves before the commit
    while let Some(joined) = units.join_next().await {
        match joined {
            Ok(UnitOutcome::Indexed) => stats.documents_indexed += 1,
            Ok(UnitOutcome::Skipped) => stats.documents_skipped += 1,
            Err(e) => {
                log::error!("indexing unit did not complete: {e}");
                stats.documents_skipped += 1;
            }
        }
    }

    let lock = Arc::try_unwrap(writer)
        .map_err(|_| Error::index("index writer still shared after completion barrier"))?;
    let mut writer = lock.into_inner();
    writer
        .commit()
        .map_err(|e| Error::index(format!("failed to commit index: {e}")))?;
    writer
        .wait_merging_threads()
        .map_err(|e| Error::index(format!("failed to close index: {e}")))?;

    stats.documents_in_index = store.num_docs()?;
    if let Ok(json) = serde_json::to_string(&stats) {
        log::info!("index statistics: {json}");
    }

    Ok(stats)
}

/// Upsert one document: any prior document under the same id is deleted
/// in the same writer generation the replacement is added in.
async fn insert(
    writer: &RwLock<IndexWriter>,
    schema: &SpecSchema,
    id: &str,
    doc: TantivyDocument,
) -> UnitOutcome {
    let guard = writer.read().await;
    guard.delete_term(Term::from_field_text(schema.id, id));
    match guard.add_document(doc) {
        Ok(_) => {
            log::debug!("indexed {id}");
            UnitOutcome::Indexed
        }
        Err(e) => {
            log::error!("unable to index {id}: {e}");
            UnitOutcome::Skipped
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
