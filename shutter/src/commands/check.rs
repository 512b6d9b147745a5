// shutter/src/commands/check.rs
//! The `check` command: classify literal strings against the active rules.

use anyhow::Result;
use shutter_core::RuleStore;
use std::io::Write;

/// Writes one verdict line per text and returns how many were sensitive.
pub fn run_check<W: Write>(texts: &[String], rules: &RuleStore, out: &mut W) -> Result<usize> {
    let snapshot = rules.snapshot();
    let mut sensitive = 0;
    for text in texts {
        match snapshot.find_match(text) {
            Some(hit) => {
                sensitive += 1;
                writeln!(out, "sensitive\t{}:{}\t{}", hit.tier, hit.public_label(), text)?;
            }
            None => writeln!(out, "clean\t-\t{}", text)?,
        }
    }
    Ok(sensitive)
}
