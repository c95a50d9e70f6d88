use ormschema_core::{
    ColumnDescriptor, EntityCatalog, EntityDescriptor, Multiplicity, RelationshipDescriptor,
};
use tracing::debug;

use crate::class::{FieldDefault, FieldType, SchemaClass, SchemaField};
use crate::errors::{ConfigurationError, Result};
use crate::options::TranslationOptions;
use crate::selection::Selection;

/// Translate `entity` into a schema class, resolving relationship targets in
/// `catalog`.
pub fn translate(
    catalog: &EntityCatalog,
    entity: &EntityDescriptor,
    options: &TranslationOptions,
) -> Result<SchemaClass> {
    Translator::new(catalog).translate(entity, options)
}

/// Entity-to-schema translator bound to a catalog.
///
/// Translation is a bounded tree walk: the depth counter alone stops
/// recursion on cyclic relationship graphs.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a EntityCatalog,
}

struct Scope<'s> {
    class_name: String,
    include: &'s Selection,
    exclude: &'s Selection,
    depth: usize,
}

impl<'a> Translator<'a> {
    pub fn new(catalog: &'a EntityCatalog) -> Self {
        Self { catalog }
    }

    /// Validate `options` against `entity`, then translate.
    ///
    /// Fails before producing any output when the class name is missing,
    /// include and exclude select fields in the same scope, or an include path
    /// does not exist.
    pub fn translate(
        &self,
        entity: &EntityDescriptor,
        options: &TranslationOptions,
    ) -> Result<SchemaClass> {
        let name = options
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigurationError::MissingClassName)?;

        let include = Selection::from_paths(&options.include)?;
        let exclude = Selection::from_paths(&options.exclude)?;
        Selection::check_disjoint(&include, &exclude)?;
        include.check_known(self.catalog, entity)?;

        let scope = Scope {
            class_name: name.to_string(),
            include: &include,
            exclude: &exclude,
            depth: options.depth,
        };
        self.translate_entity(entity, scope, options)
    }

    fn translate_entity(
        &self,
        entity: &EntityDescriptor,
        scope: Scope<'_>,
        options: &TranslationOptions,
    ) -> Result<SchemaClass> {
        let restricted = !scope.include.is_empty();
        let mut fields = Vec::with_capacity(entity.columns.len() + entity.relationships.len());

        for column in &entity.columns {
            if scope.exclude.names(&column.name) {
                continue;
            }
            if restricted && !scope.include.selects(&column.name) && !column.primary_key {
                continue;
            }
            fields.push(column_field(column, options));
        }

        for relationship in &entity.relationships {
            if scope.exclude.names(&relationship.name) {
                continue;
            }
            if restricted && !scope.include.selects(&relationship.name) {
                continue;
            }

            let include = scope.include.child(&relationship.name);
            let depth = if scope.depth > 0 {
                scope.depth - 1
            } else if !include.is_empty() {
                0
            } else {
                debug!(
                    event = "relationship_omitted",
                    class = %scope.class_name,
                    field = %relationship.name,
                    "depth bound reached"
                );
                continue;
            };

            let target = self
                .catalog
                .entity(&relationship.target)
                .ok_or_else(|| ConfigurationError::UnknownEntity(relationship.target.clone()))?;
            let nested = self.translate_entity(
                target,
                Scope {
                    class_name: format!("{}.{}", scope.class_name, relationship.name),
                    include,
                    exclude: scope.exclude.child(&relationship.name),
                    depth,
                },
                options,
            )?;
            fields.push(relationship_field(relationship, nested, options));
        }

        debug!(
            event = "class_translated",
            class = %scope.class_name,
            entity = %entity.name,
            fields = fields.len()
        );

        Ok(SchemaClass {
            name: scope.class_name,
            fields,
            populate_by_name: options.populate_by_name,
        })
    }
}

fn column_field(column: &ColumnDescriptor, options: &TranslationOptions) -> SchemaField {
    let default = if column.nullable {
        FieldDefault::Null
    } else if column.has_default {
        FieldDefault::Server
    } else {
        FieldDefault::Required
    };

    SchemaField {
        name: column.name.clone(),
        alias: options.alias_for(&column.name),
        ty: FieldType::Primitive(column.primitive),
        required: default == FieldDefault::Required,
        default,
        max_length: column.max_length.filter(|_| column.primitive.is_textual()),
        description: column.comment.clone(),
    }
}

fn relationship_field(
    relationship: &RelationshipDescriptor,
    nested: SchemaClass,
    options: &TranslationOptions,
) -> SchemaField {
    let nested = FieldType::Nested(Box::new(nested));
    let (ty, default) = match relationship.multiplicity {
        Multiplicity::One => (nested, FieldDefault::Null),
        Multiplicity::Many => (FieldType::List(Box::new(nested)), FieldDefault::EmptyList),
    };

    SchemaField {
        name: relationship.name.clone(),
        alias: options.alias_for(&relationship.name),
        ty,
        required: false,
        default,
        max_length: None,
        description: None,
    }
}
