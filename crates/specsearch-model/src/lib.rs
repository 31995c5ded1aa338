//! Specification domain model.
//!
//! The types in this crate describe the ready-made specification tree the
//! indexing core consumes: a [`Specification`] has a heading, context
//! steps, comments, tags, and an ordered list of [`Scenario`]s; each
//! scenario has its own heading (with source line number), steps, comments,
//! and tags.
//!
//! Specsearch never parses specification source text; the tree arrives
//! fully built, either constructed programmatically or deserialized from a
//! serde-JSON snapshot. The model is read-only from the core's point of
//! view: indexing borrows it and never mutates it.

pub mod collection;
pub mod spec;

pub use collection::SpecCollection;
pub use spec::{Comment, Heading, Scenario, Specification, Step};
