//! Subcommand implementations for the `shutter` CLI.

pub mod check;
pub mod keywords;
pub mod mask;
pub mod rules;

use anyhow::{Context, Result};
use log::debug;
use shutter_core::RuleStore;
use std::path::Path;
use std::sync::Arc;

use crate::utils::keyword_store::load_keywords;

/// Builds a rule store from the built-in table plus the persisted keyword
/// list and user rule file.
///
/// A malformed keyword file is an error. A malformed rule file only empties
/// the user tier, which the store reports on its own.
pub fn load_rule_store(keywords_path: &Path, rules_path: &Path) -> Result<Arc<RuleStore>> {
    let store = RuleStore::new().context("Built-in rules failed to compile")?;

    let keywords = load_keywords(keywords_path)?;
    store.set_keywords(keywords.as_slice());

    if rules_path.exists() {
        store.reload_user_rules(rules_path);
    } else {
        debug!("No user rule file at {}.", rules_path.display());
    }

    let sizes = store.tier_sizes();
    debug!(
        "Active rules: {} fixed, {} keywords, {} user patterns.",
        sizes.fixed, sizes.keywords, sizes.user_patterns
    );
    Ok(Arc::new(store))
}
