//! Terminal output helpers.

pub mod output_format;
