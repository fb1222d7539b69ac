use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// String-keyed mapping node. Key order carries no meaning.
pub type Mapping = BTreeMap<String, ConfigNode>;

#[derive(Clone, Debug, PartialEq)]
/// Leaf value of a configuration tree.
pub enum Scalar {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept in its parsed integer or float form.
    Number(serde_json::Number),
    /// JSON string.
    String(String),
}

#[derive(Clone, Debug, PartialEq)]
/// Recursive configuration value.
///
/// Nodes have no identity beyond their position in the tree. Resolution rewrites scalar fields in
/// place and never adds or removes sibling keys of its own accord.
pub enum ConfigNode {
    /// Object with unique string keys.
    Mapping(Mapping),
    /// Ordered list.
    Sequence(Vec<ConfigNode>),
    /// Leaf value.
    Scalar(Scalar),
}

impl ConfigNode {
    /// JSON `null` node.
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Empty mapping node.
    pub fn mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Borrow as a mapping, if this node is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Mutably borrow as a mapping, if this node is one.
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow as a sequence, if this node is one.
    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mutably borrow as a sequence, if this node is one.
    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<ConfigNode>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// String payload of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Payload of a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Whether this node is JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Short shape name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Scalar(Scalar::Null) => "null",
            Self::Scalar(Scalar::Bool(_)) => "bool",
            Self::Scalar(Scalar::Number(_)) => "number",
            Self::Scalar(Scalar::String(_)) => "string",
        }
    }
}

impl From<serde_json::Value> for ConfigNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<ConfigNode> for serde_json::Value {
    fn from(node: ConfigNode) -> Self {
        use serde_json::Value;
        match node {
            ConfigNode::Scalar(Scalar::Null) => Value::Null,
            ConfigNode::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            ConfigNode::Scalar(Scalar::Number(n)) => Value::Number(n),
            ConfigNode::Scalar(Scalar::String(s)) => Value::String(s),
            ConfigNode::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ConfigNode::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Mapping> for ConfigNode {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        Self::Sequence(items)
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Self::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Self::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            Self::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/node.rs"]
mod tests;
