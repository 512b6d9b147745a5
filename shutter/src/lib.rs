// shutter/src/lib.rs
//! # Shutter CLI Application
//!
//! Command-line host for `shutter-core`. It owns everything the core leaves
//! to its host: reading and writing image files, persisting the keyword list
//! and user rule file, choosing a text detector, and logging setup.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
