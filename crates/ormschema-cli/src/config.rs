use std::path::Path;

use clap::ValueEnum;
use ormschema_translate::{AliasGenerator, TranslationOptions};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Alias strategies selectable from configuration files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AliasCase {
    Camel,
    Pascal,
    Kebab,
}

impl From<AliasCase> for AliasGenerator {
    fn from(value: AliasCase) -> Self {
        match value {
            AliasCase::Camel => AliasGenerator::Camel,
            AliasCase::Pascal => AliasGenerator::Pascal,
            AliasCase::Kebab => AliasGenerator::Kebab,
        }
    }
}

/// Translation settings stored in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    pub name: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub depth: usize,
    pub alias: Option<AliasCase>,
    pub populate_by_name: bool,
}

impl TranslateConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn into_options(self) -> TranslationOptions {
        TranslationOptions {
            name: self.name,
            include: self.include.into_iter().collect(),
            exclude: self.exclude.into_iter().collect(),
            depth: self.depth,
            alias: self.alias.map(AliasGenerator::from),
            populate_by_name: self.populate_by_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: TranslateConfig = toml::from_str(
            r#"
name = "PydanticUserRelation"
include = ["id", "name", "addresses.email_address"]
depth = 1
alias = "camel"
populate_by_name = true
"#,
        )
        .expect("parse config");

        assert_eq!(config.name.as_deref(), Some("PydanticUserRelation"));
        assert_eq!(config.alias, Some(AliasCase::Camel));

        let options = config.into_options();
        assert_eq!(options.depth, 1);
        assert!(options.include.contains("addresses.email_address"));
        assert!(options.exclude.is_empty());
        assert_eq!(options.alias, Some(AliasGenerator::Camel));
        assert!(options.populate_by_name);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: TranslateConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(config, TranslateConfig::default());
        assert_eq!(config.into_options(), TranslationOptions::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<TranslateConfig>("max_depth = 2").is_err());
    }
}
