//! Core contracts and helpers for ormschema.
//!
//! This crate defines the entity descriptors supplied by the ORM layer, the
//! catalog that resolves relationship targets, and validation helpers shared
//! by the translator and the CLI.

pub mod entity;
pub mod error;
pub mod graph;
pub mod types;
pub mod validation;

pub use entity::{ColumnDescriptor, EntityCatalog, EntityDescriptor, RelationshipDescriptor};
pub use error::{Error, Result};
pub use graph::{RelationGraphReport, RelationGraphSummary, build_relation_graph_report};
pub use types::{Multiplicity, PrimitiveType};
pub use validation::validate_catalog;

/// Current contract version for `catalog.json` documents.
pub const CATALOG_VERSION: &str = "0.1";
