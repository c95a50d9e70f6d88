use ormschema_core::PrimitiveType;

/// Generated schema class: an ordered field list with no link back to the
/// entity it was translated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaClass {
    pub name: String,
    pub fields: Vec<SchemaField>,
    /// Records may be populated from field names as well as aliases.
    pub populate_by_name: bool,
}

impl SchemaClass {
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Nested class reached through a relationship field, if any.
    pub fn nested(&self, name: &str) -> Option<&SchemaClass> {
        self.field(name).and_then(|field| field.ty.class())
    }
}

/// One emitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub alias: Option<String>,
    pub ty: FieldType,
    /// A value must be supplied when populating a record.
    pub required: bool,
    pub default: FieldDefault,
    /// String-length bound carried over from the column.
    pub max_length: Option<u32>,
    pub description: Option<String>,
}

impl SchemaField {
    /// Key used for this field in serialized output: the alias when set.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.default, FieldDefault::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Nested(Box<SchemaClass>),
    /// Ordered sequence, used for "many" relationships.
    List(Box<FieldType>),
}

impl FieldType {
    /// The schema class inside a nested or list type.
    pub fn class(&self) -> Option<&SchemaClass> {
        match self {
            FieldType::Primitive(_) => None,
            FieldType::Nested(class) => Some(class),
            FieldType::List(inner) => inner.class(),
        }
    }
}

/// Value a field takes when the source does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Required,
    Null,
    EmptyList,
    /// The ORM fills the value; the schema itself declares no default.
    Server,
}
