//! Project-root resolution and index-path derivation.
//!
//! Every Specsearch operation is anchored to a project root: document
//! identifiers are specification file paths expressed relative to it, and
//! the persistent index lives at a fixed location underneath it. The root
//! is resolved once per invocation and stays stable for the duration of an
//! indexing pass.
//!
//! Resolution order:
//! 1. An explicit path supplied by the caller (CLI flag)
//! 2. The `SPECSEARCH_PROJECT_ROOT` environment variable
//! 3. Walking up from the working directory looking for a `.gauge` marker
//! 4. The working directory itself

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory under the project root that holds tool state.
pub const DOT_DIR: &str = ".gauge";

/// Index directory name inside [`DOT_DIR`].
pub const INDEX_DIR: &str = "gauge.idx";

/// Environment variable overriding project-root discovery.
pub const ROOT_ENV_VAR: &str = "SPECSEARCH_PROJECT_ROOT";

/// A resolved project root.
///
/// Cheap to clone; holds only the root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// Wrap an already-known root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the project root.
    ///
    /// An explicit path that does not exist is a configuration error; the
    /// fallback steps silently move on when their candidate is absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_dir() {
                return Err(Error::config(format!(
                    "project root {} is not a directory",
                    path.display()
                )));
            }
            return Ok(Self::new(path));
        }

        if let Ok(value) = env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(value);
            if path.is_dir() {
                return Ok(Self::new(path));
            }
        }

        let cwd = env::current_dir()?;
        if let Some(root) = find_dir_with_marker(&cwd, DOT_DIR) {
            return Ok(Self::new(root));
        }

        Ok(Self::new(cwd))
    }

    /// The root path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the persistent search index: `<root>/.gauge/gauge.idx`.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(DOT_DIR).join(INDEX_DIR)
    }

    /// Derive a document identifier for a specification file.
    ///
    /// The identifier is the file path relative to the project root, with
    /// `/` separators regardless of platform so ids stay stable across
    /// machines. Files outside the root cannot be identified and must be
    /// reported and skipped by the caller, never indexed under a wrong key.
    pub fn relative_id(&self, file: &Path) -> Result<String> {
        let rel = file
            .strip_prefix(&self.root)
            .map_err(|_| Error::document_id(file, "path is not under the project root"))?;

        if rel.as_os_str().is_empty() {
            return Err(Error::document_id(file, "path equals the project root"));
        }

        let id = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok(id)
    }
}

/// Walk up from `start`, returning the first directory containing `marker`.
fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(marker).exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
