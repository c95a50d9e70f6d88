//! Population of generated classes from in-memory entity graphs.
//!
//! Source objects are JSON values carrying attribute names, as produced by the
//! ORM layer after loading a record and its relationships.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use ormschema_core::PrimitiveType;
use serde_json::{Map, Value};

use crate::class::{FieldDefault, FieldType, SchemaClass, SchemaField};
use crate::errors::PopulateError;

/// A populated instance of a generated class, keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    class: &'a SchemaClass,
    values: Map<String, Value>,
}

impl Record<'_> {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Dump keyed by field name.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Dump keyed by alias, falling back to the field name.
    pub fn to_value_by_alias(&self) -> Value {
        Value::Object(rename_object(self.class, &self.values))
    }
}

impl SchemaClass {
    /// Build a record from an object carrying matching attribute names.
    ///
    /// Aliased fields are read by alias, and also by name when the class
    /// allows population by name. Attributes the class does not declare are
    /// ignored.
    pub fn populate(&self, source: &Value) -> Result<Record<'_>, PopulateError> {
        let values = populate_object(self, source, &self.name)?;
        Ok(Record {
            class: self,
            values,
        })
    }
}

fn populate_object(
    class: &SchemaClass,
    source: &Value,
    path: &str,
) -> Result<Map<String, Value>, PopulateError> {
    let object = source.as_object().ok_or_else(|| PopulateError::TypeMismatch {
        path: path.to_string(),
        expected: "object",
    })?;

    let mut values = Map::new();
    for field in &class.fields {
        let field_path = format!("{path}.{}", field.name);
        let value = match lookup(class, field, object) {
            None => missing_value(field, &field_path)?,
            Some(Value::Null) => null_value(field, &field_path)?,
            Some(value) => coerce(&field.ty, value, &field_path)?,
        };
        values.insert(field.name.clone(), value);
    }
    Ok(values)
}

fn lookup<'v>(
    class: &SchemaClass,
    field: &SchemaField,
    object: &'v Map<String, Value>,
) -> Option<&'v Value> {
    match &field.alias {
        Some(alias) => object.get(alias).or_else(|| {
            if class.populate_by_name {
                object.get(&field.name)
            } else {
                None
            }
        }),
        None => object.get(&field.name),
    }
}

fn missing_value(field: &SchemaField, path: &str) -> Result<Value, PopulateError> {
    match field.default {
        FieldDefault::Required => Err(PopulateError::MissingField {
            path: path.to_string(),
        }),
        FieldDefault::EmptyList => Ok(Value::Array(Vec::new())),
        FieldDefault::Null | FieldDefault::Server => Ok(Value::Null),
    }
}

fn null_value(field: &SchemaField, path: &str) -> Result<Value, PopulateError> {
    match field.default {
        FieldDefault::Null | FieldDefault::Server => Ok(Value::Null),
        FieldDefault::Required | FieldDefault::EmptyList => Err(PopulateError::TypeMismatch {
            path: path.to_string(),
            expected: expected_kind(&field.ty),
        }),
    }
}

fn coerce(ty: &FieldType, value: &Value, path: &str) -> Result<Value, PopulateError> {
    match ty {
        FieldType::Primitive(primitive) => {
            if primitive_matches(*primitive, value) {
                Ok(value.clone())
            } else {
                Err(PopulateError::TypeMismatch {
                    path: path.to_string(),
                    expected: expected_kind(ty),
                })
            }
        }
        FieldType::Nested(class) => populate_object(class, value, path).map(Value::Object),
        FieldType::List(inner) => {
            let items = value.as_array().ok_or_else(|| PopulateError::TypeMismatch {
                path: path.to_string(),
                expected: "array",
            })?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| coerce(inner, item, &format!("{path}[{idx}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
    }
}

fn primitive_matches(primitive: PrimitiveType, value: &Value) -> bool {
    match primitive {
        PrimitiveType::Integer => value.is_i64() || value.is_u64(),
        PrimitiveType::Float => value.is_number(),
        PrimitiveType::Decimal => {
            value.is_number() || value.as_str().is_some_and(|s| s.parse::<f64>().is_ok())
        }
        PrimitiveType::String | PrimitiveType::Bytes => value.is_string(),
        PrimitiveType::Boolean => value.is_boolean(),
        PrimitiveType::DateTime => value.as_str().is_some_and(is_datetime),
        PrimitiveType::Date => value
            .as_str()
            .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
        PrimitiveType::Time => value
            .as_str()
            .is_some_and(|s| NaiveTime::parse_from_str(s, "%H:%M:%S%.f").is_ok()),
        PrimitiveType::Uuid => value
            .as_str()
            .is_some_and(|s| uuid::Uuid::parse_str(s).is_ok()),
        PrimitiveType::Json => true,
    }
}

fn is_datetime(raw: &str) -> bool {
    DateTime::parse_from_rfc3339(raw).is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").is_ok()
}

fn expected_kind(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::Primitive(PrimitiveType::Integer) => "integer",
        FieldType::Primitive(PrimitiveType::Float | PrimitiveType::Decimal) => "number",
        FieldType::Primitive(PrimitiveType::String | PrimitiveType::Bytes) => "string",
        FieldType::Primitive(PrimitiveType::Boolean) => "boolean",
        FieldType::Primitive(PrimitiveType::DateTime) => "date-time string",
        FieldType::Primitive(PrimitiveType::Date) => "date string",
        FieldType::Primitive(PrimitiveType::Time) => "time string",
        FieldType::Primitive(PrimitiveType::Uuid) => "uuid string",
        FieldType::Primitive(PrimitiveType::Json) => "json value",
        FieldType::Nested(_) => "object",
        FieldType::List(_) => "array",
    }
}

fn rename_object(class: &SchemaClass, values: &Map<String, Value>) -> Map<String, Value> {
    class
        .fields
        .iter()
        .filter_map(|field| {
            let value = values.get(&field.name)?;
            Some((field.key().to_string(), rename_value(&field.ty, value)))
        })
        .collect()
}

fn rename_value(ty: &FieldType, value: &Value) -> Value {
    match (ty, value) {
        (FieldType::Nested(class), Value::Object(values)) => {
            Value::Object(rename_object(class, values))
        }
        (FieldType::List(inner), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| rename_value(inner, item))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(populate_by_name: bool) -> SchemaClass {
        SchemaClass {
            name: "Sample".to_string(),
            fields: vec![
                SchemaField {
                    name: "user_id".to_string(),
                    alias: Some("userId".to_string()),
                    ty: FieldType::Primitive(PrimitiveType::Integer),
                    required: true,
                    default: FieldDefault::Required,
                    max_length: None,
                    description: None,
                },
                SchemaField {
                    name: "created".to_string(),
                    alias: None,
                    ty: FieldType::Primitive(PrimitiveType::DateTime),
                    required: false,
                    default: FieldDefault::Server,
                    max_length: None,
                    description: None,
                },
            ],
            populate_by_name,
        }
    }

    #[test]
    fn reads_alias_and_dumps_both_ways() {
        let class = class(false);
        let record = class
            .populate(&serde_json::json!({ "userId": 7, "created": "2024-05-01T10:00:00Z" }))
            .unwrap();
        assert_eq!(
            record.to_value(),
            serde_json::json!({ "user_id": 7, "created": "2024-05-01T10:00:00Z" })
        );
        assert_eq!(
            record.to_value_by_alias(),
            serde_json::json!({ "userId": 7, "created": "2024-05-01T10:00:00Z" })
        );
    }

    #[test]
    fn field_name_needs_populate_by_name() {
        let source = serde_json::json!({ "user_id": 7 });
        assert_eq!(
            class(false).populate(&source).unwrap_err(),
            PopulateError::MissingField {
                path: "Sample.user_id".to_string()
            }
        );
        let class = class(true);
        let record = class.populate(&source).unwrap();
        assert_eq!(record.get("user_id"), Some(&serde_json::json!(7)));
        assert_eq!(record.get("created"), Some(&Value::Null));
    }

    #[test]
    fn rejects_malformed_datetime() {
        let err = class(false)
            .populate(&serde_json::json!({ "userId": 1, "created": "yesterday" }))
            .unwrap_err();
        assert_eq!(
            err,
            PopulateError::TypeMismatch {
                path: "Sample.created".to_string(),
                expected: "date-time string"
            }
        );
    }
}
