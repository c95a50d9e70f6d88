use std::collections::{BTreeMap, BTreeSet};

use crate::entity::EntityCatalog;
use crate::error::{Error, Result};

/// Validate internal consistency of an entity catalog.
///
/// This checks:
/// - duplicate entity names
/// - duplicate field names (columns and relationships share one namespace)
/// - relationship targets exist
pub fn validate_catalog(catalog: &EntityCatalog) -> Result<()> {
    let mut fields_by_entity: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for entity in &catalog.entities {
        if fields_by_entity.contains_key(entity.name.as_str()) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate entity name: {}",
                entity.name
            )));
        }

        let mut fields = BTreeSet::new();
        let names = entity
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .chain(entity.relationships.iter().map(|rel| rel.name.as_str()));
        for name in names {
            if name.is_empty() || name.contains('.') {
                return Err(Error::InvalidCatalog(format!(
                    "invalid field name on {}: '{}'",
                    entity.name, name
                )));
            }
            if !fields.insert(name) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate field name: {}.{}",
                    entity.name, name
                )));
            }
        }

        fields_by_entity.insert(entity.name.as_str(), fields);
    }

    for entity in &catalog.entities {
        for relationship in &entity.relationships {
            if !fields_by_entity.contains_key(relationship.target.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "relationship target not found: {}.{} -> {}",
                    entity.name, relationship.name, relationship.target
                )));
            }
        }
    }

    Ok(())
}
