//! Read-only view of the export options carried in a configuration.
//!
//! Writing export artifacts is the editor's job; this module only interprets the `export`
//! subtree and normalizes its target locations.

pub(crate) mod settings;
