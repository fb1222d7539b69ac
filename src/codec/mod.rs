//! Wire codecs for configuration trees.

pub(crate) mod json;
