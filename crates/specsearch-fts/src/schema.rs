//! Tantivy schema definition for the specification index.
//!
//! One fixed schema covers both document kinds (specification and
//! scenario); a `doc_type` discriminator tells them apart. Field-level
//! analysis policy:
//!
//! | Field | Type | Analysis |
//! |-------|------|----------|
//! | `id` | STRING \| STORED | keyword-exact, upsert key |
//! | `doc_type` | STRING \| FAST \| STORED | keyword-exact discriminator |
//! | `heading` | TEXT \| STORED | `en_stem` free text, positions recorded |
//! | `steps` | STORED | stored verbatim, not analyzed |
//! | `context` | STORED | stored verbatim, not analyzed |
//! | `comments` | STORED | stored verbatim, not analyzed |
//! | `tags` | FACET \| STORED | hierarchical facet `/tag/<value>` |
//!
//! Tags are a facet field rather than tokenized text: a tag such as
//! `smoke-test` is one exact bucket, never split into `smoke` and `test`.
//!
//! # Tokenizer
//!
//! Free-text fields use an English stemming analyzer (`en_stem`):
//! SimpleTokenizer → LowerCaser → Stemmer(English). "searching" matches
//! "search", "running" matches "run".

use specsearch_core::{Error, Result};
use tantivy::Index;
use tantivy::schema::{
    FAST, Facet, FacetOptions, Field, FieldType, IndexRecordOption, STORED, STRING, Schema,
    SchemaBuilder, TextFieldIndexing, TextOptions,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};

/// Facet root under which every tag value is filed.
pub const TAG_FACET_ROOT: &str = "/tag";

/// `doc_type` value for specification documents.
pub const SPEC_DOC_TYPE: &str = "spec";

/// `doc_type` value for scenario documents.
pub const SCENARIO_DOC_TYPE: &str = "scenario";

/// Specification index schema holding typed field references.
///
/// Provides typed access to schema fields, avoiding string lookups during
/// indexing and querying.
#[derive(Clone)]
pub struct SpecSchema {
    schema: Schema,

    /// Unique document identifier.
    pub id: Field,
    /// Document kind discriminator (`spec` or `scenario`).
    pub doc_type: Field,
    /// Heading text, free-text searchable.
    pub heading: Field,
    /// Scenario step text, stored in source order.
    pub steps: Field,
    /// Specification context-step text, stored in source order.
    pub context: Field,
    /// Comment text, stored in source order.
    pub comments: Field,
    /// Tag facet values.
    pub tags: Field,
}

impl SpecSchema {
    /// Build the fixed index mapping.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        // Heading carries positions so phrase highlighting works
        let heading_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer("en_stem")
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        let id = builder.add_text_field("id", STRING | STORED);
        let doc_type = builder.add_text_field("doc_type", STRING | FAST | STORED);
        let heading = builder.add_text_field("heading", heading_options);
        let steps = builder.add_text_field("steps", STORED);
        let context = builder.add_text_field("context", STORED);
        let comments = builder.add_text_field("comments", STORED);
        let tags = builder.add_facet_field("tags", FacetOptions::default().set_stored());

        let schema = builder.build();

        Self {
            schema,
            id,
            doc_type,
            heading,
            steps,
            context,
            comments,
            tags,
        }
    }

    /// Bind field handles against the schema loaded from an existing index.
    ///
    /// The persisted mapping must still be structurally compatible with the
    /// one declared at creation time; drift is a fatal configuration error,
    /// never reconciled in place.
    pub fn try_bind(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema.get_field(name).map_err(|_| {
                Error::config(format!("index mapping incompatible: missing field `{name}`"))
            })
        };

        let id = field("id")?;
        let doc_type = field("doc_type")?;
        let heading = field("heading")?;
        let steps = field("steps")?;
        let context = field("context")?;
        let comments = field("comments")?;
        let tags = field("tags")?;

        if !schema.get_field_entry(heading).is_indexed() {
            return Err(Error::config(
                "index mapping incompatible: `heading` is not indexed",
            ));
        }
        if !matches!(schema.get_field_entry(tags).field_type(), FieldType::Facet(_)) {
            return Err(Error::config(
                "index mapping incompatible: `tags` is not a facet field",
            ));
        }

        Ok(Self {
            schema: schema.clone(),
            id,
            doc_type,
            heading,
            steps,
            context,
            comments,
            tags,
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register custom tokenizers with a Tantivy index.
    ///
    /// Must be called after creating or opening an index so the `en_stem`
    /// analyzer declared by the mapping is available.
    pub fn register_tokenizers(index: &Index) {
        let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(tantivy::tokenizer::Language::English))
            .build();

        index.tokenizers().register("en_stem", en_stem);
    }
}

/// Facet path for a tag value, e.g. `smoke-test` → `/tag/smoke-test`.
pub fn tag_facet(tag: &str) -> Facet {
    Facet::from(format!("{TAG_FACET_ROOT}/{tag}").as_str())
}

impl std::fmt::Debug for SpecSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecSchema")
            .field("field_count", &7)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
