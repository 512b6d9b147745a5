//! Configuration management for `shutter-core`.
//!
//! This module defines the serializable shapes of the two rule sources the
//! core reads: the embedded table of built-in detectors and the
//! human-editable user rule file. It handles YAML (de)serialization and
//! provides utilities for loading and saving these files.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

const RULE_FILE_TMP_SUFFIX: &str = "tmp";

/// A single named built-in detector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleDefinition {
    /// Unique identifier for the rule (e.g., "email"). Used as the diagnostic label.
    pub name: String,
    /// Human-readable description of what the rule targets.
    #[serde(default)]
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: String,
}

/// The table of built-in detectors.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSet {
    pub rules: Vec<RuleDefinition>,
}

impl RuleSet {
    /// Loads the built-in rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let set: RuleSet =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        validate_definitions(&set.rules)?;
        debug!("Loaded {} default rules.", set.rules.len());
        Ok(set)
    }
}

/// The user-authored rule file: an ordered list of raw regex sources.
///
/// ```yaml
/// patterns:
///   - 'Project\s*Secret'
/// ```
///
/// Entries are kept verbatim; invalid ones are tolerated here and dropped
/// later when the rule store compiles them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRuleFile {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl UserRuleFile {
    /// Loads a user rule file from YAML. An empty file is an empty rule list.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading user rules from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;

        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: UserRuleFile = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))?;
        info!(
            "Loaded {} user patterns from file {}.",
            file.patterns.len(),
            path.display()
        );
        Ok(file)
    }

    /// Loads the rule file, treating a missing file as an empty rule list.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Rule file {} does not exist yet.", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Writes the rule file to a sibling temp file and renames it into place.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create rule directory {}", parent.display())
                })?;
            }
        }

        let yaml = serde_yml::to_string(self).context("Failed to serialize user rules")?;
        let tmp_path = path.with_extension(RULE_FILE_TMP_SUFFIX);
        fs::write(&tmp_path, yaml)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace rule file {}", path.display()))?;

        debug!("Saved {} user patterns to {}.", self.patterns.len(), path.display());
        Ok(())
    }

    /// Appends a pattern unless it is empty or already present.
    pub fn add(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if pattern.is_empty() || self.patterns.iter().any(|p| p == pattern) {
            return false;
        }
        self.patterns.push(pattern.to_string());
        true
    }

    /// Removes a pattern by exact source text.
    pub fn remove(&mut self, pattern: &str) -> bool {
        let before = self.patterns.len();
        self.patterns.retain(|p| p != pattern);
        self.patterns.len() != before
    }
}

/// Validates the built-in table: names must be present and unique, patterns non-empty.
fn validate_definitions(rules: &[RuleDefinition]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
