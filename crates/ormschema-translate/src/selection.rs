//! Dotted field paths and the per-scope selection trees built from them.
//!
//! A scope is one entity level of a translation, identified by the
//! relationship path that reaches it. `addresses.user.name` selects `name` in
//! scope `addresses.user`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ormschema_core::{EntityCatalog, EntityDescriptor};

use crate::errors::{ConfigurationError, Result};

static EMPTY: Selection = Selection {
    fields: BTreeSet::new(),
    nested: BTreeMap::new(),
};

/// A parsed dot-separated field selector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<String> = raw.split('.').map(|segment| segment.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ConfigurationError::InvalidPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Field selection for one scope plus the selections re-rooted below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Paths that end at this scope.
    fields: BTreeSet<String>,
    /// Sub-paths keyed by the relationship they pass through.
    nested: BTreeMap<String, Selection>,
}

impl Selection {
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Selection::default();
        for raw in paths {
            let path = FieldPath::parse(raw.as_ref())?;
            selection.insert(path.segments());
        }
        Ok(selection)
    }

    fn insert(&mut self, segments: &[String]) {
        match segments {
            [] => {}
            [last] => {
                self.fields.insert(last.clone());
            }
            [head, rest @ ..] => self.nested.entry(head.clone()).or_default().insert(rest),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    /// True when a path ends exactly at `name` in this scope.
    pub fn names(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// True when `name` is named directly or implied by a dotted sub-path.
    pub fn selects(&self, name: &str) -> bool {
        self.fields.contains(name) || self.nested.contains_key(name)
    }

    /// The selection re-rooted at the entity reached through `name`.
    pub fn child(&self, name: &str) -> &Selection {
        self.nested.get(name).unwrap_or(&EMPTY)
    }

    /// Fail when include and exclude both select fields in one scope.
    pub fn check_disjoint(include: &Selection, exclude: &Selection) -> Result<()> {
        check_disjoint_at(include, exclude, &mut Vec::new())
    }

    /// Fail when a path does not resolve against `entity`.
    ///
    /// Every segment but the last must be a relationship; the last may name a
    /// column or a relationship.
    pub fn check_known(&self, catalog: &EntityCatalog, entity: &EntityDescriptor) -> Result<()> {
        check_known_at(self, catalog, entity, entity, &mut Vec::new())
    }
}

fn scope_label(scope: &[&str]) -> String {
    if scope.is_empty() {
        "the root entity".to_string()
    } else {
        format!("'{}'", scope.join("."))
    }
}

fn check_disjoint_at<'a>(
    include: &'a Selection,
    exclude: &'a Selection,
    scope: &mut Vec<&'a str>,
) -> Result<()> {
    if !include.is_empty() && !exclude.fields.is_empty() {
        return Err(ConfigurationError::AmbiguousSelection {
            scope: scope_label(scope),
        });
    }

    for (name, nested_exclude) in &exclude.nested {
        if let Some(nested_include) = include.nested.get(name) {
            scope.push(name);
            check_disjoint_at(nested_include, nested_exclude, scope)?;
            scope.pop();
        }
    }

    Ok(())
}

fn check_known_at<'a>(
    selection: &'a Selection,
    catalog: &EntityCatalog,
    root: &EntityDescriptor,
    entity: &EntityDescriptor,
    scope: &mut Vec<&'a str>,
) -> Result<()> {
    let unknown = |scope: &[&str], name: &str| {
        let mut path: Vec<&str> = scope.to_vec();
        path.push(name);
        ConfigurationError::UnknownField {
            entity: root.name.clone(),
            path: path.join("."),
        }
    };

    for name in &selection.fields {
        if !entity.has_field(name) {
            return Err(unknown(scope, name));
        }
    }

    for (name, nested) in &selection.nested {
        let Some(relationship) = entity.relationship(name) else {
            return Err(unknown(scope, name));
        };
        let target = catalog
            .entity(&relationship.target)
            .ok_or_else(|| ConfigurationError::UnknownEntity(relationship.target.clone()))?;
        scope.push(name);
        check_known_at(nested, catalog, root, target, scope)?;
        scope.pop();
    }

    Ok(())
}
