//! compiler.rs - Turns rule sources into compiled matchers.
//!
//! Three kinds of source feed the rule store: the named built-in
//! definitions, literal user keywords, and raw user-authored regex
//! patterns. Keywords are converted into noise-tolerant matchers that
//! accept stray whitespace between characters, which OCR frequently
//! injects into short proper nouns.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;

use crate::config::{RuleDefinition, MAX_PATTERN_LENGTH};
use crate::errors::ShutterError;

/// 10 MB limit for a compiled regex.
const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Separator inserted between keyword characters.
const WHITESPACE_GAP: &str = r"\s*";

/// The tier a compiled rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTier {
    /// Built-in detectors, always active.
    Fixed,
    /// Derived from a registered keyword.
    Keyword,
    /// Derived from a user-authored regex.
    UserPattern,
}

impl fmt::Display for RuleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleTier::Fixed => "fixed",
            RuleTier::Keyword => "keyword",
            RuleTier::UserPattern => "user_pattern",
        };
        f.write_str(name)
    }
}

/// A single compiled sensitivity rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Rule name for built-ins, source text for keywords and user patterns.
    pub label: String,
    pub tier: RuleTier,
}

impl CompiledRule {
    /// Unanchored search over `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A collection of compiled rules for one tier.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds the noise-tolerant regex source for a keyword.
///
/// Each character of the trimmed keyword is escaped on its own so escape
/// sequences never straddle an inserted gap. Inner whitespace stays a literal
/// segment, so `"Acme Corp"` still requires a separator between the words.
pub fn keyword_pattern_source(keyword: &str) -> Option<String> {
    let segments: Vec<String> = keyword
        .trim()
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0u8; 4])))
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(WHITESPACE_GAP))
    }
}

/// Compiles a literal keyword into a case-insensitive, whitespace-tolerant matcher.
pub fn compile_keyword(keyword: &str) -> Result<CompiledRule, ShutterError> {
    let source = keyword_pattern_source(keyword)
        .ok_or_else(|| ShutterError::invalid_rule(keyword, "keyword is empty"))?;

    debug!("Keyword compiled to pattern '{}'.", source);

    let regex = RegexBuilder::new(&source)
        .case_insensitive(true)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
        .map_err(|e| ShutterError::invalid_rule(keyword, e))?;

    Ok(CompiledRule {
        regex,
        label: keyword.trim().to_string(),
        tier: RuleTier::Keyword,
    })
}

/// Compiles a user-authored regex as written.
///
/// Malformed syntax, including constructs the regex dialect does not
/// support such as look-around, is reported as [`ShutterError::InvalidRule`].
/// There is no source length limit; only the compiled size is bounded.
pub fn compile_user_pattern(raw: &str) -> Result<CompiledRule, ShutterError> {
    if raw.is_empty() {
        return Err(ShutterError::invalid_rule(raw, "pattern is empty"));
    }

    let regex = RegexBuilder::new(raw)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
        .map_err(|e| ShutterError::invalid_rule(raw, e))?;

    Ok(CompiledRule {
        regex,
        label: raw.to_string(),
        tier: RuleTier::UserPattern,
    })
}

/// Compiles the built-in definitions. Any failure is fatal.
pub fn compile_rules(definitions: &[RuleDefinition]) -> Result<CompiledRules, ShutterError> {
    debug!("Starting compilation of {} built-in rules.", definitions.len());

    let mut compiled_rules = Vec::with_capacity(definitions.len());
    let mut compilation_errors = Vec::new();

    for definition in definitions {
        if definition.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ShutterError::PatternLengthExceeded(
                definition.name.clone(),
                definition.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&definition.pattern)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "shutter_core::compiler",
                    "Rule '{}' compiled successfully.",
                    &definition.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    label: definition.name.clone(),
                    tier: RuleTier::Fixed,
                });
            }
            Err(e) => {
                compilation_errors.push(ShutterError::RuleCompilationError(
                    definition.name.clone(),
                    e,
                ));
            }
        }
    }

    if compilation_errors.is_empty() {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    } else {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ShutterError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    }
}
