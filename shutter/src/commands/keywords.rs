// shutter/src/commands/keywords.rs
//! The `keywords` command: edit the persisted keyword list.

use anyhow::Result;
use shutter_core::rule_fingerprint;
use std::io::Write;
use std::path::Path;

use crate::cli::ListCommand;
use crate::ui::output_format::{info_msg, success_msg};
use crate::utils::keyword_store::{load_keywords, save_keywords};

pub fn run_keywords<W: Write>(cmd: &ListCommand, path: &Path, out: &mut W) -> Result<()> {
    let mut list = load_keywords(path)?;
    match cmd {
        ListCommand::Add { value } => {
            if list.add(value) {
                save_keywords(path, &list)?;
                success_msg(format!("Added keyword ({} total).", list.len()));
            } else {
                info_msg("Keyword is empty or already registered; nothing changed.");
            }
        }
        ListCommand::Remove { value } => {
            if list.remove(value) {
                save_keywords(path, &list)?;
                success_msg(format!("Removed keyword ({} left).", list.len()));
            } else {
                info_msg("Keyword was not registered; nothing changed.");
            }
        }
        ListCommand::List => {
            // The fingerprint is how reports and `scan` refer to a keyword.
            for keyword in list.iter() {
                writeln!(out, "{}\t{keyword}", rule_fingerprint(keyword))?;
            }
        }
    }
    Ok(())
}
