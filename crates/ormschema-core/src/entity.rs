use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Multiplicity, PrimitiveType};

/// Set of entity descriptors supplied by the ORM layer.
///
/// Relationships refer to their targets by entity name, so a catalog can hold
/// cyclic graphs (`User -> Address -> User`) without shared ownership.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntityCatalog {
    /// Contract version for this catalog format.
    #[serde(default = "default_catalog_version")]
    pub catalog_version: String,
    /// Mapped entities in declaration order.
    pub entities: Vec<EntityDescriptor>,
}

fn default_catalog_version() -> String {
    crate::CATALOG_VERSION.to_string()
}

impl EntityCatalog {
    /// Build a catalog from already-constructed descriptors.
    pub fn new(entities: Vec<EntityDescriptor>) -> Self {
        Self {
            catalog_version: default_catalog_version(),
            entities,
        }
    }

    /// Look up an entity by name.
    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Look up an entity by name, failing when it is absent.
    pub fn require(&self, name: &str) -> Result<&EntityDescriptor> {
        self.entity(name)
            .ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }
}

/// One ORM-mapped class: its columns and its relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntityDescriptor {
    pub name: String,
    /// Backing table name when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDescriptor>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            comment: None,
            columns: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_relationship(mut self, relationship: RelationshipDescriptor) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships
            .iter()
            .find(|relationship| relationship.name == name)
    }

    /// Returns true when a column or relationship with this name exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.column(name).is_some() || self.relationship(name).is_some()
    }
}

/// Column metadata for a mapped attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub primitive: PrimitiveType,
    #[serde(default)]
    pub nullable: bool,
    /// Declared length bound for string-like columns (e.g. `String(32)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The ORM fills this column when no value is supplied.
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnDescriptor {
    /// A non-nullable column without default or constraints.
    pub fn new(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            primitive,
            nullable: false,
            max_length: None,
            comment: None,
            has_default: false,
            primary_key: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Named link from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RelationshipDescriptor {
    pub name: String,
    /// Name of the target entity in the catalog.
    pub target: String,
    pub multiplicity: Multiplicity,
}

impl RelationshipDescriptor {
    pub fn one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            multiplicity: Multiplicity::One,
        }
    }

    pub fn many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            multiplicity: Multiplicity::Many,
        }
    }
}
