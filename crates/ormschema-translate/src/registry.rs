use std::collections::BTreeMap;
use std::sync::Arc;

use ormschema_core::{EntityCatalog, EntityDescriptor};
use tracing::debug;

use crate::class::SchemaClass;
use crate::errors::{ConfigurationError, Result};
use crate::options::TranslationOptions;
use crate::translator::Translator;

/// Generated classes memoized by class name.
///
/// Requesting a registered name again returns the cached class when the
/// entity and options match, and fails when they differ.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    classes: BTreeMap<String, Registered>,
}

#[derive(Debug)]
struct Registered {
    entity: String,
    options: TranslationOptions,
    class: Arc<SchemaClass>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<SchemaClass>> {
        self.classes.get(name).map(|entry| Arc::clone(&entry.class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get_or_translate(
        &mut self,
        catalog: &EntityCatalog,
        entity: &EntityDescriptor,
        options: &TranslationOptions,
    ) -> Result<Arc<SchemaClass>> {
        let name = options
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigurationError::MissingClassName)?;

        if let Some(entry) = self.classes.get(name) {
            if entry.entity != entity.name || entry.options != *options {
                return Err(ConfigurationError::DuplicateClassName(name.to_string()));
            }
            debug!(event = "class_cache_hit", class = %name);
            return Ok(Arc::clone(&entry.class));
        }

        let class = Arc::new(Translator::new(catalog).translate(entity, options)?);
        self.classes.insert(
            name.to_string(),
            Registered {
                entity: entity.name.clone(),
                options: options.clone(),
                class: Arc::clone(&class),
            },
        );
        Ok(class)
    }
}
