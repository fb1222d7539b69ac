//! Asset reference resolution for photo/video editor configurations.
//!
//! Editor configurations are arbitrarily nested JSON documents that name audio clips, video clips,
//! stickers, filters, frames, overlays, fonts and a watermark by portable reference. Before the
//! configuration reaches an editor, every such reference has to become a URI the host can load.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: wire JSON -> [`Mapping`] ([`decode`])
//! 2. **Resolve**: rewrite every schema-designated asset field in place ([`ConfigResolver`])
//! 3. **Encode** (optional): [`Mapping`] -> wire JSON ([`encode`])
//!
//! Only the bundled-asset lookup is host specific; it is supplied as an [`AssetNamespace`].
//!
//! ```
//! use editor_config::{ConfigResolver, PrefixNamespace, decode};
//!
//! let mut root = decode(r#"{"text": {"fonts": [{"fontURI": "fonts/a.ttf"}]}}"#).unwrap();
//! ConfigResolver::new(PrefixNamespace::flutter()).resolve(&mut root);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod codec;
mod config;
mod export;
mod foundation;
mod resolve;
mod schema;
mod tree;

pub use crate::assets::namespace::{
    AssetNamespace, DirectoryNamespace, FLUTTER_ASSET_PREFIX, MapNamespace, PrefixNamespace,
    normalize_rel_path,
};
pub use crate::assets::resolve::{Resolution, is_resolved, resolve_reference, resolve_uri};
pub use crate::codec::json::{decode, decode_reader, encode, encode_pretty};
pub use crate::config::{ResolverConfig, UnresolvedPolicy};
pub use crate::export::settings::{
    ExportDirs, ExportSettings, ExportType, export_location,
};
pub use crate::foundation::error::{EditorConfigError, EditorConfigResult};
pub use crate::resolve::pass::{ConfigResolver, ResolveStats};
pub use crate::schema::catalog::{CategoryShape, ResolutionRule, SchemaCatalog};
pub use crate::tree::node::{ConfigNode, Mapping, Scalar};

/// Dotted key-path access into configuration trees.
pub mod key_path {
    pub use crate::tree::key_path::{KeyPath, get, get_mut, get_or, remove, set};
}

pub use crate::key_path::KeyPath;
