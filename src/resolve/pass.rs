use crate::assets::namespace::AssetNamespace;
use crate::assets::resolve::{Resolution, resolve_reference};
use crate::codec::json;
use crate::config::{ResolverConfig, UnresolvedPolicy};
use crate::foundation::error::EditorConfigResult;
use crate::schema::catalog::{CategoryShape, ResolutionRule, SchemaCatalog};
use crate::tree::key_path::{self, KeyPath};
use crate::tree::node::{ConfigNode, Mapping};

/// Counters collected during one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Families whose category node was present with the expected shape.
    pub families_visited: usize,
    /// Bare names rewritten to bundled URIs.
    pub fields_resolved: usize,
    /// References already in absolute or schemed form.
    pub fields_unchanged: usize,
    /// References the namespace could not resolve, nulled or removed.
    pub fields_cleared: usize,
}

/// Resolves every asset reference in a configuration tree.
///
/// The resolver holds no per-pass state; one instance can run any number of independent passes.
#[derive(Clone, Debug)]
pub struct ConfigResolver<N> {
    catalog: SchemaCatalog,
    namespace: N,
    unresolved: UnresolvedPolicy,
}

impl<N: AssetNamespace> ConfigResolver<N> {
    /// Resolver over the built-in catalog that nulls unresolvable fields.
    pub fn new(namespace: N) -> Self {
        Self {
            catalog: SchemaCatalog::standard(),
            namespace,
            unresolved: UnresolvedPolicy::Null,
        }
    }

    /// Resolver configured from a [`ResolverConfig`].
    pub fn from_config(namespace: N, config: &ResolverConfig) -> EditorConfigResult<Self> {
        Ok(Self {
            catalog: config.catalog()?,
            namespace,
            unresolved: config.unresolved,
        })
    }

    /// Replace the catalog.
    pub fn with_catalog(mut self, catalog: SchemaCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the unresolved-name policy.
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    /// Active catalog.
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Bundled-asset namespace.
    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    /// Resolve all asset references in `root`, in place.
    ///
    /// `root` itself is mutated rather than copied, so every holder of it sees the resolved tree.
    /// Only schema-designated string fields are rewritten (or cleared); absent families, absent
    /// fields and nodes of an unexpected shape are skipped. Re-running the pass on its own output
    /// changes nothing, provided the namespace returns absolute paths or schemed URIs.
    ///
    /// Passes over the same tree must not run concurrently.
    #[tracing::instrument(skip_all, fields(families = self.catalog.rules().len()))]
    pub fn resolve(&self, root: &mut Mapping) -> ResolveStats {
        let mut stats = ResolveStats::default();
        for rule in self.catalog.rules() {
            self.resolve_family(root, rule, &mut stats);
        }
        tracing::debug!(?stats, "resolution pass finished");
        stats
    }

    /// Decode `text`, resolve it and encode the result.
    pub fn resolve_document(&self, text: &str) -> EditorConfigResult<(String, ResolveStats)> {
        let mut root = json::decode(text)?;
        let stats = self.resolve(&mut root);
        let out = json::encode(&ConfigNode::Mapping(root))?;
        Ok((out, stats))
    }

    fn resolve_family(&self, root: &mut Mapping, rule: &ResolutionRule, stats: &mut ResolveStats) {
        let family = rule.family.as_str();
        let Some(node) = key_path::get_mut(root, &rule.category_path) else {
            tracing::debug!(family, path = %rule.category_path, "family absent");
            return;
        };

        match (rule.shape, node) {
            (CategoryShape::Sequence, ConfigNode::Sequence(categories)) => {
                stats.families_visited += 1;
                for category in categories.iter_mut().filter_map(ConfigNode::as_mapping_mut) {
                    self.resolve_category(category, rule, stats);
                }
            }
            (CategoryShape::Single, ConfigNode::Mapping(category)) => {
                stats.families_visited += 1;
                self.resolve_category(category, rule, stats);
            }
            (shape, other) => {
                tracing::debug!(
                    family,
                    ?shape,
                    found = other.kind_name(),
                    "family has unexpected shape; skipped"
                );
            }
        }
    }

    fn resolve_category(&self, category: &mut Mapping, rule: &ResolutionRule, stats: &mut ResolveStats) {
        self.resolve_fields(category, &rule.category_fields, &rule.family, stats);

        let Some((items_path, item_fields)) = rule.items() else {
            return;
        };
        let Some(items) = key_path::get_mut(category, items_path).and_then(ConfigNode::as_sequence_mut)
        else {
            return;
        };
        for item in items.iter_mut().filter_map(ConfigNode::as_mapping_mut) {
            self.resolve_fields(item, item_fields, &rule.family, stats);
        }
    }

    fn resolve_fields(
        &self,
        target: &mut Mapping,
        fields: &[KeyPath],
        family: &str,
        stats: &mut ResolveStats,
    ) {
        for field in fields {
            let Some(reference) = key_path::get(target, field).and_then(ConfigNode::as_str) else {
                continue;
            };
            match resolve_reference(reference, &self.namespace) {
                Resolution::AlreadyResolved => stats.fields_unchanged += 1,
                Resolution::Bundled(uri) => {
                    key_path::set(target, field, ConfigNode::from(uri));
                    stats.fields_resolved += 1;
                }
                Resolution::Missing => {
                    tracing::warn!(
                        family,
                        field = %field,
                        reference,
                        "bundled asset not found; clearing reference"
                    );
                    match self.unresolved {
                        UnresolvedPolicy::Null => {
                            key_path::set(target, field, ConfigNode::null());
                        }
                        UnresolvedPolicy::Remove => {
                            key_path::remove(target, field);
                        }
                    }
                    stats.fields_cleared += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/pass.rs"]
mod tests;
