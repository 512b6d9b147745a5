// shutter/src/commands/rules.rs
//! The `rules` command: edit the user regex rule file.

use anyhow::{Context, Result};
use shutter_core::{compile_user_pattern, rule_fingerprint, UserRuleFile};
use std::io::Write;
use std::path::Path;

use crate::cli::ListCommand;
use crate::ui::output_format::{info_msg, success_msg};

pub fn run_rules<W: Write>(cmd: &ListCommand, path: &Path, out: &mut W) -> Result<()> {
    let mut file = UserRuleFile::load_or_default(path)?;
    match cmd {
        ListCommand::Add { value } => {
            // Invalid patterns would be skipped at load time anyway; refuse them up front.
            compile_user_pattern(value)
                .with_context(|| format!("Refusing to save pattern '{value}'"))?;
            if file.add(value) {
                file.save_to_file(path)?;
                success_msg(format!("Added rule ({} total).", file.patterns.len()));
            } else {
                info_msg("Rule is already registered; nothing changed.");
            }
        }
        ListCommand::Remove { value } => {
            if file.remove(value) {
                file.save_to_file(path)?;
                success_msg(format!("Removed rule ({} left).", file.patterns.len()));
            } else {
                info_msg("Rule was not registered; nothing changed.");
            }
        }
        ListCommand::List => {
            for pattern in &file.patterns {
                writeln!(out, "{}\t{pattern}", rule_fingerprint(pattern))?;
            }
        }
    }
    Ok(())
}
