use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{EditorConfigError, EditorConfigResult};
use crate::tree::key_path::KeyPath;

/// Shape of the node addressed by a rule's category path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryShape {
    /// A sequence of category (or item) mappings, each resolved in turn.
    #[default]
    Sequence,
    /// One mapping resolved directly.
    Single,
}

/// Resolution rule for one asset family.
///
/// `category_path` addresses either a sequence of category mappings or, for single-node families
/// such as the watermark, one mapping. `category_fields` are resolved on each addressed mapping.
/// When `items_path` is set, it addresses a further sequence of item mappings inside each category
/// whose `item_fields` are resolved the same way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRule {
    /// Family name used in diagnostics.
    pub family: String,
    /// Location of the category sequence (or single mapping) from the configuration root.
    pub category_path: KeyPath,
    /// Expected shape at `category_path`. A node of any other shape skips the family.
    #[serde(default)]
    pub shape: CategoryShape,
    /// Fields resolved on each category.
    #[serde(default)]
    pub category_fields: Vec<KeyPath>,
    /// Location of the item sequence inside each category.
    #[serde(default)]
    pub items_path: Option<KeyPath>,
    /// Fields resolved on each item.
    #[serde(default)]
    pub item_fields: Vec<KeyPath>,
}

impl ResolutionRule {
    fn builtin(
        family: &str,
        shape: CategoryShape,
        category_path: &'static str,
        category_fields: &[&'static str],
        items_path: Option<&'static str>,
        item_fields: &[&'static str],
    ) -> Self {
        Self {
            family: family.to_string(),
            category_path: KeyPath::trusted(category_path),
            shape,
            category_fields: category_fields
                .iter()
                .copied()
                .map(KeyPath::trusted)
                .collect(),
            items_path: items_path.map(KeyPath::trusted),
            item_fields: item_fields.iter().copied().map(KeyPath::trusted).collect(),
        }
    }

    /// Item sub-path and fields, when this family nests items inside categories.
    pub fn items(&self) -> Option<(&KeyPath, &[KeyPath])> {
        self.items_path
            .as_ref()
            .map(|path| (path, self.item_fields.as_slice()))
    }
}

const FRAME_FIELDS: &[&str] = &[
    "thumbnailURI",
    "imageGroups.top.startURI",
    "imageGroups.top.midURI",
    "imageGroups.top.endURI",
    "imageGroups.bottom.startURI",
    "imageGroups.bottom.midURI",
    "imageGroups.bottom.endURI",
    "imageGroups.left.startURI",
    "imageGroups.left.midURI",
    "imageGroups.left.endURI",
    "imageGroups.right.startURI",
    "imageGroups.right.midURI",
    "imageGroups.right.endURI",
];

/// Ordered table of resolution rules. Rules are applied in table order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SchemaCatalog {
    rules: Vec<ResolutionRule>,
}

impl SchemaCatalog {
    /// Catalog with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in families: audio, video composition, stickers, filters, frames, overlays, fonts and
    /// the watermark.
    pub fn standard() -> Self {
        let rules = vec![
            ResolutionRule::builtin(
                "audio",
                CategoryShape::Sequence,
                "audio.categories",
                &["thumbnailURI"],
                Some("items"),
                &["thumbnailURI", "audioURI"],
            ),
            ResolutionRule::builtin(
                "composition",
                CategoryShape::Sequence,
                "composition.categories",
                &["thumbnailURI"],
                Some("items"),
                &["thumbnailURI", "videoURI"],
            ),
            ResolutionRule::builtin(
                "sticker",
                CategoryShape::Sequence,
                "sticker.categories",
                &["thumbnailURI"],
                Some("items"),
                &["thumbnailURI", "stickerURI"],
            ),
            ResolutionRule::builtin(
                "filter",
                CategoryShape::Sequence,
                "filter.categories",
                &["thumbnailURI"],
                Some("items"),
                &["lutURI"],
            ),
            ResolutionRule::builtin(
                "frame",
                CategoryShape::Sequence,
                "frame.items",
                FRAME_FIELDS,
                None,
                &[],
            ),
            ResolutionRule::builtin(
                "overlay",
                CategoryShape::Sequence,
                "overlay.items",
                &["thumbnailURI", "overlayURI"],
                None,
                &[],
            ),
            ResolutionRule::builtin(
                "font",
                CategoryShape::Sequence,
                "text.fonts",
                &["fontURI"],
                None,
                &[],
            ),
            ResolutionRule::builtin(
                "watermark",
                CategoryShape::Single,
                "watermark",
                &["watermarkURI"],
                None,
                &[],
            ),
        ];
        Self { rules }
    }

    /// Build from explicit rules, rejecting duplicate family names.
    pub fn from_rules(rules: Vec<ResolutionRule>) -> EditorConfigResult<Self> {
        let mut catalog = Self::empty();
        for rule in rules {
            catalog.push(rule)?;
        }
        Ok(catalog)
    }

    /// Append a rule, rejecting a family name that is already present.
    pub fn push(&mut self, rule: ResolutionRule) -> EditorConfigResult<()> {
        if rule.family.trim().is_empty() {
            return Err(EditorConfigError::validation("family name must be non-empty"));
        }
        if self.rules.iter().any(|r| r.family == rule.family) {
            return Err(EditorConfigError::validation(format!(
                "duplicate asset family '{}'",
                rule.family
            )));
        }
        if rule.items_path.is_none() && !rule.item_fields.is_empty() {
            return Err(EditorConfigError::validation(format!(
                "family '{}' lists item fields without an items path",
                rule.family
            )));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[ResolutionRule] {
        &self.rules
    }

    /// Look a rule up by family name.
    pub fn family(&self, name: &str) -> Option<&ResolutionRule> {
        self.rules.iter().find(|r| r.family == name)
    }

    /// Top-level configuration keys touched by this catalog.
    pub fn root_keys(&self) -> HashSet<&str> {
        self.rules
            .iter()
            .filter_map(|r| r.category_path.segments().first().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/catalog.rs"]
mod tests;
