//! In-memory configuration tree and dotted key-path access.
//!
//! The tree is the only data shape the rest of the crate operates on: a JSON-like recursive value
//! with explicit [`ConfigNode::Mapping`], [`ConfigNode::Sequence`] and [`ConfigNode::Scalar`]
//! variants.

pub(crate) mod key_path;
pub(crate) mod node;
