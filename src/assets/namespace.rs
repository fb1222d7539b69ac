use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::foundation::error::{EditorConfigError, EditorConfigResult};

/// Host capability that maps a bundled asset name to a loadable URI.
///
/// Lookups are synchronous and must not fail loudly: an unknown name yields `None`.
pub trait AssetNamespace {
    /// Resolve `name` (a bare relative asset name) to a host-loadable URI.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<F> AssetNamespace for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Prefix used by Flutter-style embedded asset packages.
pub const FLUTTER_ASSET_PREFIX: &str = "asset:///flutter_assets/";

/// Namespace that always succeeds by prepending a fixed URI prefix.
#[derive(Clone, Debug)]
pub struct PrefixNamespace {
    prefix: String,
}

impl PrefixNamespace {
    /// Build a namespace that maps `name` to `{prefix}{name}`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Embedded asset package layout (`asset:///flutter_assets/<name>`).
    pub fn flutter() -> Self {
        Self::new(FLUTTER_ASSET_PREFIX)
    }
}

impl AssetNamespace for PrefixNamespace {
    fn lookup(&self, name: &str) -> Option<String> {
        Some(format!("{}{}", self.prefix, name))
    }
}

/// Namespace backed by an explicit name → URI table.
#[derive(Clone, Debug, Default)]
pub struct MapNamespace {
    entries: BTreeMap<String, String>,
}

impl MapNamespace {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.insert(name, uri);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, uri: impl Into<String>) {
        self.entries.insert(name.into(), uri.into());
    }
}

impl AssetNamespace for MapNamespace {
    fn lookup(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

/// Namespace backed by an asset bundle directory on disk.
///
/// A name resolves only when it is a clean relative path to an existing file inside the bundle;
/// the result is an absolute `file://` URI.
#[derive(Clone, Debug)]
pub struct DirectoryNamespace {
    root: PathBuf,
}

impl DirectoryNamespace {
    /// Use `root` as the bundle directory. The path is made absolute against the current directory.
    pub fn new(root: impl Into<PathBuf>) -> EditorConfigResult<Self> {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map_err(|e| EditorConfigError::Other(anyhow::Error::new(e)))?
                .join(root)
        };
        Ok(Self { root })
    }

    /// Bundle directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl AssetNamespace for DirectoryNamespace {
    fn lookup(&self, name: &str) -> Option<String> {
        let rel = normalize_rel_path(name).ok()?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return None;
        }
        url::Url::from_file_path(&path).ok().map(String::from)
    }
}

/// Normalize and validate bundle-relative asset names.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> EditorConfigResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(EditorConfigError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(EditorConfigError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(EditorConfigError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(EditorConfigError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/namespace.rs"]
mod tests;
