use crate::foundation::error::{EditorConfigError, EditorConfigResult};
use crate::tree::node::{ConfigNode, Mapping};

/// Parse a JSON document into a configuration tree.
///
/// Objects become mappings, arrays become sequences and scalars map directly. Syntax errors and
/// top-level values other than an object fail with
/// [`EditorConfigError::MalformedDocument`]; no partial tree is returned.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn decode(text: &str) -> EditorConfigResult<Mapping> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| EditorConfigError::malformed(format!("parse JSON: {e}")))?;
    into_mapping(value)
}

/// Read and decode a JSON document from `r`.
pub fn decode_reader<R: std::io::Read>(r: R) -> EditorConfigResult<Mapping> {
    let value: serde_json::Value = serde_json::from_reader(r)
        .map_err(|e| EditorConfigError::malformed(format!("parse JSON: {e}")))?;
    into_mapping(value)
}

fn into_mapping(value: serde_json::Value) -> EditorConfigResult<Mapping> {
    match ConfigNode::from(value) {
        ConfigNode::Mapping(map) => Ok(map),
        other => Err(EditorConfigError::malformed(format!(
            "top-level value must be an object, found {}",
            other.kind_name()
        ))),
    }
}

/// Encode a tree as compact JSON. Sequence order is preserved; mapping keys come out sorted.
pub fn encode(node: &ConfigNode) -> EditorConfigResult<String> {
    serde_json::to_string(node).map_err(|e| EditorConfigError::Other(e.into()))
}

/// Encode a tree as indented JSON.
pub fn encode_pretty(node: &ConfigNode) -> EditorConfigResult<String> {
    serde_json::to_string_pretty(node).map_err(|e| EditorConfigError::Other(e.into()))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/json.rs"]
mod tests;
