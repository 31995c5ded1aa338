//! Error types for the Specsearch library crates.

use std::path::PathBuf;

/// Errors that can occur while indexing or querying specifications.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error (index directory creation, file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error (bad project root, incompatible index mapping)
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Index engine error (open, create, write, or query failure)
    #[error("Index error: {message}")]
    Index {
        /// Human-readable description of the engine failure
        message: String,
    },

    /// No index exists at the expected path
    #[error("No search index found at {path} (run `specsearch index` first)")]
    IndexNotFound {
        /// Path where the index was expected
        path: PathBuf,
    },

    /// Document identifier could not be derived for a specification file
    #[error("Cannot derive document id for {path}: {reason}")]
    DocumentId {
        /// The specification file the id was derived from
        path: PathBuf,
        /// Why derivation failed
        reason: String,
    },
}

/// Convenience `Result` type alias for Specsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error invalidates the whole operation.
    ///
    /// Fatal errors (open failures, mapping incompatibility, commit
    /// failures) abort the indexing pass or query. Non-fatal errors are
    /// local to a single document: they are logged, the document is
    /// skipped, and the batch continues.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Serialization(_) => true,
            Error::Config { .. } => true,
            Error::Index { .. } => true,
            Error::IndexNotFound { .. } => true,
            Error::DocumentId { .. } => false,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new index engine error.
    pub fn index<S: Into<String>>(message: S) -> Self {
        Error::Index {
            message: message.into(),
        }
    }

    /// Creates a new document-id derivation error.
    pub fn document_id<P, S>(path: P, reason: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Error::DocumentId {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
