use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{EditorConfigError, EditorConfigResult};
use crate::tree::node::{ConfigNode, Mapping};

/// Dot-separated address into nested mappings, e.g. `sticker.categories`.
///
/// Every segment is a mapping key; key paths never index into sequences. Segments are guaranteed
/// non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted key path. Leading, trailing or doubled dots are rejected.
    pub fn parse(path: &str) -> EditorConfigResult<Self> {
        if path.is_empty() {
            return Err(EditorConfigError::invalid_key_path("key path must be non-empty"));
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(EditorConfigError::invalid_key_path(format!(
                "'{path}' contains an empty segment"
            )));
        }
        Ok(Self { segments })
    }

    /// Build from a literal known to be well formed (built-in catalog entries).
    pub(crate) fn trusted(path: &'static str) -> Self {
        debug_assert!(Self::parse(path).is_ok(), "bad built-in key path {path:?}");
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Path segments in traversal order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = EditorConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = EditorConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.to_string()
    }
}

fn parent<'a>(root: &'a Mapping, parents: &[String]) -> Option<&'a Mapping> {
    let mut cur = root;
    for seg in parents {
        cur = cur.get(seg)?.as_mapping()?;
    }
    Some(cur)
}

fn parent_mut<'a>(root: &'a mut Mapping, parents: &[String]) -> Option<&'a mut Mapping> {
    let mut cur = root;
    for seg in parents {
        cur = cur.get_mut(seg)?.as_mapping_mut()?;
    }
    Some(cur)
}

/// Read the node at `path`.
///
/// Returns `None` when any segment is missing or an intermediate node is not a mapping.
pub fn get<'a>(root: &'a Mapping, path: &KeyPath) -> Option<&'a ConfigNode> {
    let (parents, last) = path.split_last();
    parent(root, parents)?.get(last)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(root: &'a mut Mapping, path: &KeyPath) -> Option<&'a mut ConfigNode> {
    let (parents, last) = path.split_last();
    parent_mut(root, parents)?.get_mut(last)
}

/// Read the node at `path`, falling back to `default` when it is absent or JSON `null`.
pub fn get_or<'a>(root: &'a Mapping, path: &KeyPath, default: &'a ConfigNode) -> &'a ConfigNode {
    match get(root, path) {
        Some(node) if !node.is_null() => node,
        _ => default,
    }
}

/// Write `value` at `path`.
///
/// Only the terminal key is written. When an intermediate segment is missing or not a mapping the
/// call does nothing and returns `false`: structure the caller did not define is never created.
pub fn set(root: &mut Mapping, path: &KeyPath, value: ConfigNode) -> bool {
    let (parents, last) = path.split_last();
    match parent_mut(root, parents) {
        Some(map) => {
            map.insert(last.to_string(), value);
            true
        }
        None => false,
    }
}

/// Remove and return the node at `path`, with the same traversal rules as [`set`].
pub fn remove(root: &mut Mapping, path: &KeyPath) -> Option<ConfigNode> {
    let (parents, last) = path.split_last();
    parent_mut(root, parents)?.remove(last)
}

#[cfg(test)]
#[path = "../../tests/unit/tree/key_path.rs"]
mod tests;
