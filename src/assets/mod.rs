//! Asset reference resolution.
//!
//! A bundled-asset namespace ([`AssetNamespace`]) is the only host-specific piece; everything else
//! is shared.

pub(crate) mod namespace;
pub(crate) mod resolve;
