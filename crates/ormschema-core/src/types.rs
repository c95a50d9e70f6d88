use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primitive value type of a mapped column, as resolved by the ORM layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Integer,
    Float,
    Decimal,
    String,
    Boolean,
    DateTime,
    Date,
    Time,
    Uuid,
    Bytes,
    Json,
}

impl PrimitiveType {
    /// Returns true when a max length bound is meaningful for the type.
    pub fn is_textual(self) -> bool {
        matches!(self, PrimitiveType::String | PrimitiveType::Bytes)
    }
}

/// Cardinality of a relationship as seen from the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// Many-to-one or one-to-one: at most one related record.
    One,
    /// One-to-many or many-to-many: an ordered sequence of related records.
    Many,
}
