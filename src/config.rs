//! Resolver configuration.
//!
//! Configuration is explicit and serializable. The library never reads environment variables or
//! files on its own; hosts load a [`ResolverConfig`] and hand it to
//! [`crate::ConfigResolver::from_config`].

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{EditorConfigError, EditorConfigResult};
use crate::schema::catalog::{ResolutionRule, SchemaCatalog};

/// What to do with a field whose bundled asset name cannot be found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Overwrite the field with JSON `null`.
    #[default]
    Null,
    /// Delete the field from its mapping.
    Remove,
}

/// Resolver configuration root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolverConfig {
    /// Handling of unresolvable asset names.
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,

    /// Whether the built-in asset families are active.
    #[serde(default = "ResolverConfig::default_include_standard_families")]
    pub include_standard_families: bool,

    /// Extra families, applied after the built-in ones.
    #[serde(default)]
    pub families: Vec<ResolutionRule>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::default(),
            include_standard_families: Self::default_include_standard_families(),
            families: Vec::new(),
        }
    }
}

impl ResolverConfig {
    fn default_include_standard_families() -> bool {
        true
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> EditorConfigResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| EditorConfigError::validation(format!("parse resolver config: {e}")))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> EditorConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read resolver config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Build the effective catalog: built-in families (if enabled) followed by `families`.
    pub fn catalog(&self) -> EditorConfigResult<SchemaCatalog> {
        let mut catalog = if self.include_standard_families {
            SchemaCatalog::standard()
        } else {
            SchemaCatalog::empty()
        };
        for rule in &self.families {
            catalog.push(rule.clone())?;
        }
        Ok(catalog)
    }

    /// Check the configuration without building a resolver.
    pub fn validate(&self) -> EditorConfigResult<()> {
        self.catalog().map(|_| ())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
