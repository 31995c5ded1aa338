//! Index store lifecycle: open an existing on-disk index or create one
//! with the fixed field mapping.
//!
//! The create-vs-open decision hinges specifically on "no index exists at
//! this path" (no `meta.json`). Every other open failure (corrupt index,
//! permission denied, incompatible mapping) is surfaced as a fatal error:
//! repairing or silently recreating could destroy a valid index.

use std::path::Path;

use specsearch_core::{Error, Result};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};

use crate::schema::SpecSchema;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// An opened specification index with its bound schema.
pub struct IndexStore {
    index: Index,
    schema: SpecSchema,
}

impl IndexStore {
    /// Open the index at `path`, creating it with the fixed mapping when no
    /// index exists there yet. Existing documents are left untouched.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if index_exists(path) {
            return Self::open_at(path);
        }

        std::fs::create_dir_all(path)?;
        let schema = SpecSchema::build();
        let index = Index::create_in_dir(path, schema.schema().clone())
            .map_err(|e| Error::index(format!("failed to create index at {}: {e}", path.display())))?;
        SpecSchema::register_tokenizers(&index);

        log::debug!("created index at {}", path.display());
        Ok(Self { index, schema })
    }

    /// Open the index at `path`, never creating one.
    ///
    /// Absence is reported as [`Error::IndexNotFound`] so callers can tell
    /// the user indexing has not been performed yet.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !index_exists(path) {
            return Err(Error::IndexNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::open_at(path)
    }

    /// Create a volatile in-memory index (for tests).
    pub fn in_memory() -> Self {
        let schema = SpecSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());
        SpecSchema::register_tokenizers(&index);
        Self { index, schema }
    }

    fn open_at(path: &Path) -> Result<Self> {
        let index = Index::open_in_dir(path)
            .map_err(|e| Error::index(format!("failed to open index at {}: {e}", path.display())))?;

        // The persisted mapping must still match the one we declare
        let schema = SpecSchema::try_bind(&index.schema())?;
        SpecSchema::register_tokenizers(&index);

        Ok(Self { index, schema })
    }

    /// The underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The bound schema.
    pub fn schema(&self) -> &SpecSchema {
        &self.schema
    }

    /// Create a writer for concurrent document insertion.
    pub fn writer(&self) -> Result<IndexWriter> {
        self.index
            .writer(WRITER_BUFFER_SIZE)
            .map_err(|e| Error::index(format!("failed to create index writer: {e}")))
    }

    /// Create a reader pinned to the latest committed state.
    pub fn reader(&self) -> Result<IndexReader> {
        self.index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::index(format!("failed to create index reader: {e}")))
    }

    /// Number of committed, searchable documents.
    pub fn num_docs(&self) -> Result<u64> {
        Ok(self.reader()?.searcher().num_docs())
    }
}

/// True when a Tantivy index lives at `path`.
pub fn index_exists(path: &Path) -> bool {
    path.join("meta.json").exists()
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("index", &"<tantivy::Index>")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_or_create_creates_fresh_index() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");

        assert!(!index_exists(&path));
        let store = IndexStore::open_or_create(&path).unwrap();
        assert!(index_exists(&path));
        assert_eq!(store.num_docs().unwrap(), 0);
    }

    #[test]
    fn test_reopen_preserves_documents() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");

        {
            let store = IndexStore::open_or_create(&path).unwrap();
            let mut writer = store.writer().unwrap();
            let mut doc = tantivy::TantivyDocument::new();
            doc.add_text(store.schema().id, "specs/login.spec");
            doc.add_text(store.schema().heading, "Customer login");
            writer.add_document(doc).unwrap();
            writer.commit().unwrap();
        }

        // Second open must not wipe or recreate
        let store = IndexStore::open_or_create(&path).unwrap();
        assert_eq!(store.num_docs().unwrap(), 1);
    }

    #[test]
    fn test_open_existing_missing_index() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");

        let err = IndexStore::open_existing(&path).unwrap_err();
        assert!(matches!(err, Error::IndexNotFound { .. }));
    }

    #[test]
    fn test_open_existing_after_create() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gauge.idx");

        drop(IndexStore::open_or_create(&path).unwrap());
        assert!(IndexStore::open_existing(&path).is_ok());
    }

    #[test]
    fn test_in_memory_store() {
        let store = IndexStore::in_memory();
        assert_eq!(store.num_docs().unwrap(), 0);
    }
}
