//! Static description of where asset references live in an editor configuration.

pub(crate) mod catalog;
