use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};

/// Signature of a caller-supplied alias function.
pub type AliasFn = dyn Fn(&str) -> String + Send + Sync;

/// Renames emitted fields. Applied to every field at every nesting level.
#[derive(Clone)]
pub enum AliasGenerator {
    /// `email_address` -> `emailAddress`
    Camel,
    /// `email_address` -> `EmailAddress`
    Pascal,
    /// `email_address` -> `email-address`
    Kebab,
    Custom(Arc<AliasFn>),
}

impl AliasGenerator {
    pub fn custom(generator: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        AliasGenerator::Custom(Arc::new(generator))
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            AliasGenerator::Camel => name.to_case(Case::Camel),
            AliasGenerator::Pascal => name.to_case(Case::Pascal),
            AliasGenerator::Kebab => name.to_case(Case::Kebab),
            AliasGenerator::Custom(generator) => generator(name),
        }
    }
}

impl PartialEq for AliasGenerator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AliasGenerator::Camel, AliasGenerator::Camel)
            | (AliasGenerator::Pascal, AliasGenerator::Pascal)
            | (AliasGenerator::Kebab, AliasGenerator::Kebab) => true,
            (AliasGenerator::Custom(left), AliasGenerator::Custom(right)) => {
                Arc::ptr_eq(left, right)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for AliasGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasGenerator::Camel => f.write_str("Camel"),
            AliasGenerator::Pascal => f.write_str("Pascal"),
            AliasGenerator::Kebab => f.write_str("Kebab"),
            AliasGenerator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Options that control how an entity is translated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationOptions {
    /// Name of the generated schema class. Required.
    pub name: Option<String>,
    /// Field paths to keep, dot-separated for related entities.
    pub include: BTreeSet<String>,
    /// Field paths to drop, dot-separated for related entities.
    pub exclude: BTreeSet<String>,
    /// Relationship levels to translate. `0` omits relationships unless an
    /// include path names fields below them.
    pub depth: usize,
    pub alias: Option<AliasGenerator>,
    /// Accept field names as well as aliases when populating records.
    pub populate_by_name: bool,
}

impl TranslationOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_alias(mut self, alias: AliasGenerator) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn with_populate_by_name(mut self, populate_by_name: bool) -> Self {
        self.populate_by_name = populate_by_name;
        self
    }

    pub(crate) fn alias_for(&self, name: &str) -> Option<String> {
        self.alias.as_ref().map(|generator| generator.apply(name))
    }
}
