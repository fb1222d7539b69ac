use std::path::{Path, PathBuf};

use crate::foundation::error::{EditorConfigError, EditorConfigResult};
use crate::tree::key_path::{self, KeyPath};
use crate::tree::node::{ConfigNode, Mapping};

const DEFAULT_EXPORT_DIR: &str = "editor-export";

/// How an export result is handed back to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportType {
    /// Written to a file; requires a target location.
    #[default]
    FileUrl,
    /// Returned inline as a data URL.
    DataUrl,
    /// Returned as an in-memory object.
    Object,
}

impl ExportType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileUrl => "file-url",
            Self::DataUrl => "data-url",
            Self::Object => "object",
        }
    }

    fn parse(s: &str) -> EditorConfigResult<Self> {
        match s {
            "file-url" => Ok(Self::FileUrl),
            "data-url" => Ok(Self::DataUrl),
            "object" => Ok(Self::Object),
            other => Err(EditorConfigError::validation(format!(
                "unknown export type '{other}'"
            ))),
        }
    }
}

/// Directories used to place relative and `~`-prefixed export targets.
#[derive(Clone, Debug)]
pub struct ExportDirs {
    /// Base for relative targets.
    pub temp_dir: PathBuf,
    /// Expansion of a leading `~`, if known.
    pub home_dir: Option<PathBuf>,
}

impl ExportDirs {
    /// Process temp dir and `$HOME`.
    pub fn from_env() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            home_dir: std::env::var_os("HOME").map(PathBuf::from),
        }
    }
}

/// Export options read from the `export` subtree of a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSettings {
    /// `export.image.exportType`.
    pub image_type: ExportType,
    /// `export.filename`, without extension.
    pub filename: String,
    /// `export.serialization.enabled`.
    pub serialization_enabled: bool,
    /// `export.serialization.exportType`.
    pub serialization_type: ExportType,
    /// `export.serialization.filename`, without extension.
    pub serialization_filename: String,
    /// `export.serialization.embedSourceImage`.
    pub serialization_embed_image: bool,
    /// `export.video.segments`.
    pub video_segments: bool,
}

fn default_filename() -> String {
    format!("{DEFAULT_EXPORT_DIR}/{}", uuid::Uuid::new_v4())
}

fn read_str(root: &Mapping, path: &'static str) -> EditorConfigResult<Option<String>> {
    match key_path::get(root, &KeyPath::trusted(path)) {
        None => Ok(None),
        Some(node) if node.is_null() => Ok(None),
        Some(node) => node.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
            EditorConfigError::validation(format!(
                "'{path}' must be a string, found {}",
                node.kind_name()
            ))
        }),
    }
}

fn read_bool(root: &Mapping, path: &'static str) -> EditorConfigResult<bool> {
    match key_path::get(root, &KeyPath::trusted(path)) {
        None => Ok(false),
        Some(node) if node.is_null() => Ok(false),
        Some(node) => node.as_bool().ok_or_else(|| {
            EditorConfigError::validation(format!(
                "'{path}' must be a boolean, found {}",
                node.kind_name()
            ))
        }),
    }
}

fn read_type(root: &Mapping, path: &'static str) -> EditorConfigResult<ExportType> {
    read_str(root, path)?
        .map(|s| ExportType::parse(&s))
        .transpose()
        .map(Option::unwrap_or_default)
}

impl ExportSettings {
    /// Read export options from `root`, defaulting anything absent or `null`.
    pub fn from_tree(root: &Mapping) -> EditorConfigResult<Self> {
        Ok(Self {
            image_type: read_type(root, "export.image.exportType")?,
            filename: read_str(root, "export.filename")?.unwrap_or_else(default_filename),
            serialization_enabled: read_bool(root, "export.serialization.enabled")?,
            serialization_type: read_type(root, "export.serialization.exportType")?,
            serialization_filename: read_str(root, "export.serialization.filename")?
                .unwrap_or_else(default_filename),
            serialization_embed_image: read_bool(root, "export.serialization.embedSourceImage")?,
            video_segments: read_bool(root, "export.video.segments")?,
        })
    }

    /// Image export target as a URL with `image_ext` appended.
    pub fn image_location(&self, image_ext: &str, dirs: &ExportDirs) -> Option<String> {
        export_location(&self.filename, image_ext, dirs)
    }

    /// Serialization export target (always `.json`).
    pub fn serialization_location(&self, dirs: &ExportDirs) -> Option<String> {
        export_location(&self.serialization_filename, "json", dirs)
    }

    /// Check that every enabled file export has a usable target, then write the image target back
    /// to `export.filename`.
    ///
    /// The write follows key-path `set` rules: when `export` is absent nothing is written.
    pub fn apply(
        &self,
        root: &mut Mapping,
        image_ext: &str,
        dirs: &ExportDirs,
    ) -> EditorConfigResult<Option<String>> {
        let image = self.image_location(image_ext, dirs);
        if self.image_type == ExportType::FileUrl && image.is_none() {
            return Err(EditorConfigError::validation(format!(
                "export filename '{}' cannot be turned into a file location",
                self.filename
            )));
        }
        if self.serialization_enabled
            && self.serialization_type == ExportType::FileUrl
            && self.serialization_location(dirs).is_none()
        {
            return Err(EditorConfigError::validation(format!(
                "serialization filename '{}' cannot be turned into a file location",
                self.serialization_filename
            )));
        }

        let value = image
            .clone()
            .map(ConfigNode::from)
            .unwrap_or_else(ConfigNode::null);
        key_path::set(root, &KeyPath::trusted("export.filename"), value);
        Ok(image)
    }
}

/// Turn a configured export target into a URL string with `.{extension}` appended.
///
/// A value with a URL scheme is kept as is. Otherwise it is a filesystem path: a leading `~` is
/// expanded against the home dir and other relative paths land under the temp dir.
pub fn export_location(raw: &str, extension: &str, dirs: &ExportDirs) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(mut url) = url::Url::parse(raw) {
        // Single-letter schemes are Windows drive letters, not URLs.
        if url.scheme().len() > 1 {
            let path = format!("{}.{extension}", url.path());
            url.set_path(&path);
            return Some(url.into());
        }
    }

    let path = if let Some(rest) = raw.strip_prefix('~') {
        let home = dirs.home_dir.as_ref()?;
        home.join(rest.trim_start_matches('/'))
    } else if Path::new(raw).is_absolute() {
        PathBuf::from(raw)
    } else {
        dirs.temp_dir.join(raw)
    };

    let mut file_name = path.file_name()?.to_os_string();
    file_name.push(".");
    file_name.push(extension);
    let path = path.with_file_name(file_name);
    url::Url::from_file_path(&path).ok().map(String::from)
}

#[cfg(test)]
#[path = "../../tests/unit/export/settings.rs"]
mod tests;
