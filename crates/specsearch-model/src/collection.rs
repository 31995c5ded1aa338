//! Specification collection handed to the indexing core.

use std::sync::Arc;

use crate::spec::Specification;

/// An in-memory collection of specifications.
///
/// Specifications are stored behind `Arc` so concurrent indexing units can
/// share them without copying the tree. The collection is read-only once
/// built.
#[derive(Debug, Clone, Default)]
pub struct SpecCollection {
    specs: Vec<Arc<Specification>>,
}

impl SpecCollection {
    /// Build a collection from owned specifications.
    pub fn new(specs: Vec<Specification>) -> Self {
        Self {
            specs: specs.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of specifications.
    pub fn size(&self) -> usize {
        self.specs.len()
    }

    /// True when the collection holds no specifications.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Total number of scenarios across all specifications.
    pub fn scenario_count(&self) -> usize {
        self.specs.iter().map(|s| s.scenarios.len()).sum()
    }

    /// Total units of indexable work: one per specification plus one per
    /// scenario. Computed up front so completion can be tracked precisely.
    pub fn unit_count(&self) -> usize {
        self.size() + self.scenario_count()
    }

    /// The specifications, shared.
    pub fn specs(&self) -> &[Arc<Specification>] {
        &self.specs
    }
}

impl From<Vec<Specification>> for SpecCollection {
    fn from(specs: Vec<Specification>) -> Self {
        Self::new(specs)
    }
}
