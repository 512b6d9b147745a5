//! Filesystem helpers for the `shutter` CLI.

pub mod keyword_store;
pub mod paths;
