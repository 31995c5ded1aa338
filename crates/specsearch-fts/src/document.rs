//! Flat, searchable document records.
//!
//! The specification→scenario tree is flattened into independent sibling
//! documents because the index engine knows nothing about nesting. The
//! builders here are pure transforms: tree in, records out, no shared
//! state with the tree walker.
//!
//! Identifiers are stable across passes:
//! - specification: file path relative to the project root
//! - scenario: `<spec id>:<scenario heading line number>`
//!
//! Line numbers are unique within one file and the spec-id prefix keeps
//! scenario ids unique across files.

use specsearch_core::{ProjectRoot, Result};
use specsearch_model::{Scenario, Specification};
use tantivy::TantivyDocument;

use crate::schema::{SCENARIO_DOC_TYPE, SPEC_DOC_TYPE, SpecSchema, tag_facet};

/// Searchable record for one specification file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDocument {
    /// Specification file path relative to the project root.
    pub id: String,
    /// Specification heading, free-text searchable.
    pub heading: String,
    /// Context-step text in source order.
    pub context_steps: Vec<String>,
    /// Comment text in source order.
    pub comments: Vec<String>,
    /// Tag values; empty when the specification is untagged.
    pub tags: Vec<String>,
}

impl SpecDocument {
    /// Build the record for a specification under an already-derived id.
    pub fn build(spec: &Specification, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: spec.heading.value.clone(),
            context_steps: spec.context_steps.iter().map(|s| s.text.clone()).collect(),
            comments: spec.comments.iter().map(|c| c.value.clone()).collect(),
            tags: spec.tags.clone(),
        }
    }

    /// Convert to the engine's document representation.
    pub fn to_tantivy(&self, schema: &SpecSchema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(schema.id, &self.id);
        doc.add_text(schema.doc_type, SPEC_DOC_TYPE);
        doc.add_text(schema.heading, &self.heading);
        for step in &self.context_steps {
            doc.add_text(schema.context, step);
        }
        for comment in &self.comments {
            doc.add_text(schema.comments, comment);
        }
        for tag in &self.tags {
            doc.add_facet(schema.tags, tag_facet(tag));
        }
        doc
    }
}

/// Searchable record for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDocument {
    /// `<spec id>:<heading line number>`.
    pub id: String,
    /// Scenario heading, free-text searchable.
    pub heading: String,
    /// Step text in source order.
    pub steps: Vec<String>,
    /// Comment text in source order.
    pub comments: Vec<String>,
    /// Tag values; empty when the scenario is untagged.
    pub tags: Vec<String>,
}

impl ScenarioDocument {
    /// Convert to the engine's document representation.
    pub fn to_tantivy(&self, schema: &SpecSchema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(schema.id, &self.id);
        doc.add_text(schema.doc_type, SCENARIO_DOC_TYPE);
        doc.add_text(schema.heading, &self.heading);
        for step in &self.steps {
            doc.add_text(schema.steps, step);
        }
        for comment in &self.comments {
            doc.add_text(schema.comments, comment);
        }
        for tag in &self.tags {
            doc.add_facet(schema.tags, tag_facet(tag));
        }
        doc
    }
}

/// Produce exactly one [`SpecDocument`] for a specification.
///
/// Fails when the specification's file path cannot be expressed relative
/// to the project root; the caller reports the error and skips the
/// document rather than indexing it under a wrong key.
pub fn spec_document(spec: &Specification, root: &ProjectRoot) -> Result<SpecDocument> {
    let id = root.relative_id(&spec.file_name)?;
    Ok(SpecDocument::build(spec, id))
}

/// Identifier for a scenario within its specification file.
pub fn scenario_id(spec_id: &str, line_no: u32) -> String {
    format!("{spec_id}:{line_no}")
}

/// Produce exactly one [`ScenarioDocument`] for a scenario.
pub fn scenario_document(scenario: &Scenario, spec_id: &str) -> ScenarioDocument {
    ScenarioDocument {
        id: scenario_id(spec_id, scenario.heading.line_no),
        heading: scenario.heading.value.clone(),
        steps: scenario.steps.iter().map(|s| s.text.clone()).collect(),
        comments: scenario.comments.iter().map(|c| c.value.clone()).collect(),
        tags: scenario.tags.clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================
