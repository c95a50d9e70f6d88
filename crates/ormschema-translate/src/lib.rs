//! Translation of ORM entity descriptors into schema classes.
//!
//! [`translate`] walks an [`EntityDescriptor`] and emits a [`SchemaClass`]
//! mirroring its columns and, up to a depth bound, its relationships. The
//! generated class can be rendered as JSON Schema and used to populate
//! records from in-memory entity graphs.

pub mod class;
pub mod errors;
pub mod json_schema;
pub mod options;
pub mod populate;
pub mod registry;
pub mod selection;
pub mod translator;

pub use class::{FieldDefault, FieldType, SchemaClass, SchemaField};
pub use errors::{ConfigurationError, PopulateError, Result};
pub use options::{AliasGenerator, TranslationOptions};
pub use populate::Record;
pub use registry::SchemaRegistry;
pub use selection::{FieldPath, Selection};
pub use translator::{Translator, translate};

pub use ormschema_core::{EntityCatalog, EntityDescriptor};
