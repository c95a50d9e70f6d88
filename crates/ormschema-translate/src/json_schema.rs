//! JSON Schema rendering of generated schema classes.
//!
//! Nested classes are emitted once under `definitions` and referenced with
//! `$ref`, keyed by their generated class name.

use ormschema_core::PrimitiveType;
use schemars::Map;
use schemars::schema::{
    ArrayValidation, InstanceType, Metadata, ObjectValidation, RootSchema, Schema, SchemaObject,
    SingleOrVec, StringValidation, SubschemaValidation,
};
use serde_json::Value;

use crate::class::{FieldDefault, FieldType, SchemaClass, SchemaField};

impl SchemaClass {
    /// Render this class, and every class nested in it, as JSON Schema.
    pub fn json_schema(&self) -> RootSchema {
        let mut definitions = Map::new();
        let schema = object_schema(self, &mut definitions);
        RootSchema {
            meta_schema: None,
            schema,
            definitions,
        }
    }

    /// [`SchemaClass::json_schema`] as a JSON value.
    pub fn json_schema_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.json_schema())
    }
}

fn object_schema(class: &SchemaClass, definitions: &mut Map<String, Schema>) -> SchemaObject {
    let mut object = ObjectValidation::default();
    for field in &class.fields {
        let key = field.key().to_string();
        if field.required {
            object.required.insert(key.clone());
        }
        object
            .properties
            .insert(key, field_schema(field, definitions).into());
    }

    SchemaObject {
        metadata: Some(Box::new(Metadata {
            title: Some(class.name.clone()),
            ..Default::default()
        })),
        instance_type: Some(InstanceType::Object.into()),
        object: Some(Box::new(object)),
        ..Default::default()
    }
}

fn field_schema(field: &SchemaField, definitions: &mut Map<String, Schema>) -> SchemaObject {
    let mut schema = match &field.ty {
        FieldType::Primitive(primitive) => {
            let mut schema = primitive_schema(*primitive, field.max_length);
            if field.is_nullable() {
                allow_null(&mut schema);
            }
            schema
        }
        FieldType::Nested(class) => {
            let reference = class_reference(class, definitions);
            if field.is_nullable() {
                any_of_null(reference)
            } else {
                reference
            }
        }
        FieldType::List(inner) => list_schema(inner, definitions),
    };

    let default = match field.default {
        FieldDefault::Null => Some(Value::Null),
        FieldDefault::EmptyList => Some(Value::Array(Vec::new())),
        FieldDefault::Required | FieldDefault::Server => None,
    };

    schema.metadata = Some(Box::new(Metadata {
        title: Some(title_case(&field.name)),
        description: field.description.clone(),
        default,
        ..Default::default()
    }));
    schema
}

fn primitive_schema(primitive: PrimitiveType, max_length: Option<u32>) -> SchemaObject {
    let (instance_type, format) = match primitive {
        PrimitiveType::Integer => (Some(InstanceType::Integer), None),
        PrimitiveType::Float | PrimitiveType::Decimal => (Some(InstanceType::Number), None),
        PrimitiveType::String => (Some(InstanceType::String), None),
        PrimitiveType::Boolean => (Some(InstanceType::Boolean), None),
        PrimitiveType::DateTime => (Some(InstanceType::String), Some("date-time")),
        PrimitiveType::Date => (Some(InstanceType::String), Some("date")),
        PrimitiveType::Time => (Some(InstanceType::String), Some("time")),
        PrimitiveType::Uuid => (Some(InstanceType::String), Some("uuid")),
        PrimitiveType::Bytes => (Some(InstanceType::String), Some("binary")),
        PrimitiveType::Json => (None, None),
    };

    let string = max_length.map(|max_length| {
        Box::new(StringValidation {
            max_length: Some(max_length),
            ..Default::default()
        })
    });

    SchemaObject {
        instance_type: instance_type.map(Into::into),
        format: format.map(str::to_string),
        string,
        ..Default::default()
    }
}

fn allow_null(schema: &mut SchemaObject) {
    schema.instance_type = match schema.instance_type.take() {
        Some(SingleOrVec::Single(single)) => {
            Some(SingleOrVec::Vec(vec![*single, InstanceType::Null]))
        }
        Some(SingleOrVec::Vec(mut types)) => {
            if !types.contains(&InstanceType::Null) {
                types.push(InstanceType::Null);
            }
            Some(SingleOrVec::Vec(types))
        }
        // Untyped values already admit null.
        None => None,
    };
}

fn any_of_null(schema: SchemaObject) -> SchemaObject {
    let null = SchemaObject {
        instance_type: Some(InstanceType::Null.into()),
        ..Default::default()
    };
    SchemaObject {
        subschemas: Some(Box::new(SubschemaValidation {
            any_of: Some(vec![schema.into(), null.into()]),
            ..Default::default()
        })),
        ..Default::default()
    }
}

fn class_reference(class: &SchemaClass, definitions: &mut Map<String, Schema>) -> SchemaObject {
    if !definitions.contains_key(&class.name) {
        let schema = object_schema(class, definitions);
        definitions.insert(class.name.clone(), schema.into());
    }
    SchemaObject::new_ref(format!("#/definitions/{}", class.name))
}

fn list_schema(inner: &FieldType, definitions: &mut Map<String, Schema>) -> SchemaObject {
    let items = match inner {
        FieldType::Primitive(primitive) => primitive_schema(*primitive, None),
        FieldType::Nested(class) => class_reference(class, definitions),
        FieldType::List(nested) => list_schema(nested, definitions),
    };

    SchemaObject {
        instance_type: Some(InstanceType::Array.into()),
        array: Some(Box::new(ArrayValidation {
            items: Some(SingleOrVec::Single(Box::new(items.into()))),
            ..Default::default()
        })),
        ..Default::default()
    }
}

/// Human-readable property title: `email_address` -> `Email Address`.
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_word_boundaries() {
        assert_eq!(title_case("id"), "Id");
        assert_eq!(title_case("email_address"), "Email Address");
        assert_eq!(title_case("userID"), "Userid");
    }

    #[test]
    fn nullable_primitive_admits_null() {
        let mut schema = primitive_schema(PrimitiveType::String, Some(32));
        allow_null(&mut schema);
        let json = serde_json::to_value(Schema::from(schema)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": ["string", "null"], "maxLength": 32 })
        );
    }

    #[test]
    fn untyped_json_column_stays_untyped() {
        let mut schema = primitive_schema(PrimitiveType::Json, None);
        allow_null(&mut schema);
        assert!(schema.instance_type.is_none());
    }
}
