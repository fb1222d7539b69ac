//! Whole-tree resolution pass.

pub(crate) mod pass;
