//! store.rs - The three-tier rule store and its sensitivity predicate.
//!
//! The store owns the compiled projection of every rule source: the fixed
//! built-in tier, the keyword tier and the user-pattern tier. Tiers are held
//! behind a single `RwLock<Arc<RuleTiers>>`. Mutators compile the replacement
//! tier outside the lock and then swap it in, so readers only ever observe a
//! complete tier.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{RuleSet, UserRuleFile};
use crate::errors::ShutterError;
use crate::redaction::rule_fingerprint;
use crate::rules::compiler::{
    compile_keyword, compile_rules, compile_user_pattern, CompiledRule, CompiledRules, RuleTier,
};

/// Which rule fired for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub tier: RuleTier,
    /// Rule name for built-ins; the keyword or pattern source otherwise.
    pub label: String,
}

impl RuleHit {
    /// A label that is safe to report. Built-in rules keep their name;
    /// keywords and user patterns are replaced by their fingerprint.
    pub fn public_label(&self) -> String {
        match self.tier {
            RuleTier::Fixed => self.label.clone(),
            RuleTier::Keyword | RuleTier::UserPattern => rule_fingerprint(&self.label),
        }
    }
}

/// Rule counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSizes {
    pub fixed: usize,
    pub keywords: usize,
    pub user_patterns: usize,
}

#[derive(Debug, Clone)]
struct RuleTiers {
    fixed: Arc<CompiledRules>,
    keywords: Arc<CompiledRules>,
    user_patterns: Arc<CompiledRules>,
}

/// A consistent, immutable view of all three tiers.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    tiers: Arc<RuleTiers>,
}

impl RuleSnapshot {
    fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.tiers
            .fixed
            .rules
            .iter()
            .chain(self.tiers.keywords.rules.iter())
            .chain(self.tiers.user_patterns.rules.iter())
    }

    /// Returns the first rule, across all tiers, that matches `text`.
    ///
    /// Which rule is reported may depend on tier order; whether one is
    /// reported does not.
    pub fn find_match(&self, text: &str) -> Option<RuleHit> {
        self.iter().find(|rule| rule.is_match(text)).map(|rule| RuleHit {
            tier: rule.tier,
            label: rule.label.clone(),
        })
    }

    pub fn is_sensitive(&self, text: &str) -> bool {
        self.iter().any(|rule| rule.is_match(text))
    }

    pub fn sizes(&self) -> TierSizes {
        TierSizes {
            fixed: self.tiers.fixed.len(),
            keywords: self.tiers.keywords.len(),
            user_patterns: self.tiers.user_patterns.len(),
        }
    }
}

/// Holds the fixed, keyword and user-pattern tiers.
#[derive(Debug)]
pub struct RuleStore {
    tiers: RwLock<Arc<RuleTiers>>,
}

impl RuleStore {
    /// Builds a store with the embedded built-in tier and empty user tiers.
    pub fn new() -> Result<Self, ShutterError> {
        let set = RuleSet::load_default_rules()?;
        let fixed = compile_rules(&set.rules)?;
        info!("Rule store initialized with {} built-in rules.", fixed.len());
        Ok(Self::with_fixed(fixed))
    }

    /// Builds a store around an already compiled fixed tier.
    pub fn with_fixed(fixed: CompiledRules) -> Self {
        Self {
            tiers: RwLock::new(Arc::new(RuleTiers {
                fixed: Arc::new(fixed),
                keywords: Arc::default(),
                user_patterns: Arc::default(),
            })),
        }
    }

    /// Replaces the keyword tier. Keywords that fail to compile are dropped.
    pub fn set_keywords<S: AsRef<str>>(&self, keywords: &[S]) {
        let tier = compile_tier(keywords, compile_keyword);
        debug!("Keyword tier rebuilt with {} rules.", tier.len());
        self.swap(|tiers| tiers.keywords = Arc::new(tier));
    }

    /// Replaces the user-pattern tier. Invalid patterns are dropped with a warning.
    pub fn load_user_patterns<S: AsRef<str>>(&self, patterns: &[S]) {
        let tier = compile_tier(patterns, compile_user_pattern);
        debug!("User-pattern tier rebuilt with {} rules.", tier.len());
        self.swap(|tiers| tiers.user_patterns = Arc::new(tier));
    }

    /// Re-reads the user rule file and replaces the user-pattern tier.
    ///
    /// A missing or unreadable file yields an empty tier rather than an error.
    /// Returns the number of active user patterns.
    pub fn reload_user_rules<P: AsRef<Path>>(&self, path: P) -> usize {
        let path = path.as_ref();
        let patterns = match UserRuleFile::load_from_file(path) {
            Ok(file) => file.patterns,
            Err(e) => {
                warn!(
                    "User rules unavailable ({:#}); continuing with an empty user tier.",
                    e
                );
                Vec::new()
            }
        };
        self.load_user_patterns(&patterns);
        self.snapshot().sizes().user_patterns
    }

    /// A consistent view of all tiers, unaffected by later mutations.
    pub fn snapshot(&self) -> RuleSnapshot {
        let guard = self.tiers.read().unwrap_or_else(PoisonError::into_inner);
        RuleSnapshot { tiers: Arc::clone(&guard) }
    }

    pub fn is_sensitive(&self, text: &str) -> bool {
        self.snapshot().is_sensitive(text)
    }

    pub fn find_match(&self, text: &str) -> Option<RuleHit> {
        self.snapshot().find_match(text)
    }

    pub fn tier_sizes(&self) -> TierSizes {
        self.snapshot().sizes()
    }

    fn swap(&self, update: impl FnOnce(&mut RuleTiers)) {
        let mut guard = self.tiers.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = RuleTiers::clone(&guard);
        update(&mut next);
        *guard = Arc::new(next);
    }
}

/// Compiles every source, logging and skipping the ones that fail.
fn compile_tier<S, F>(sources: &[S], compile: F) -> CompiledRules
where
    S: AsRef<str>,
    F: Fn(&str) -> Result<CompiledRule, ShutterError>,
{
    let mut rules = Vec::with_capacity(sources.len());
    for source in sources {
        match compile(source.as_ref()) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!("Skipping rule: {}", e),
        }
    }
    CompiledRules { rules }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RuleStore {
        RuleStore::new().expect("built-in rules compile")
    }

    #[test]
    fn test_fixed_tier_phone() {
        let store = store();
        assert!(store.is_sensitive("090-1234-5678"));
        assert!(!store.is_sensitive("Hello World"));
        assert_eq!(
            store.find_match("TEL 03-1234-5678"),
            Some(RuleHit { tier: RuleTier::Fixed, label: "phone".to_string() })
        );
    }

    #[test]
    fn test_fixed_tier_other_detectors() {
        let store = store();
        assert!(store.is_sensitive("〒100-0001"));
        assert!(store.is_sensitive("contact: jane.doe@example.co.jp"));
        assert!(store.is_sensitive("4111 1111 1111 1111"));
        assert!(store.is_sensitive("4111-1111-1111-1111"));
        assert!(store.is_sensitive("4111111111111111"));
        assert!(store.is_sensitive("住所：東京都千代田区"));
        assert!(store.is_sensitive("Address: 1 Main St"));
        assert!(store.is_sensitive("氏名: 山田太郎"));
        assert!(store.is_sensitive("Name：Taro"));
        assert!(!store.is_sensitive("Name Taro"));
        assert!(!store.is_sensitive("Invoice 2024"));
    }

    #[test]
    fn test_keyword_tier_replace_all() {
        let store = store();
        store.set_keywords(&["ACME"]);
        assert!(store.is_sensitive("A C M E Corp"));
        assert!(store.is_sensitive("acme"));
        assert!(!store.is_sensitive("AMCE"));

        store.set_keywords(&["Globex"]);
        assert!(!store.is_sensitive("acme"));
        assert!(store.is_sensitive("GLOBEX"));
    }

    #[test]
    fn test_empty_keywords_are_dropped() {
        let store = store();
        store.set_keywords(&["", "ACME", "  "]);
        assert_eq!(store.tier_sizes().keywords, 1);
    }

    #[test]
    fn test_invalid_user_pattern_is_dropped() {
        let store = store();
        store.load_user_patterns(&[r"Project\s*Secret", "(unbalanced", r"Code\d{3}"]);
        assert_eq!(store.tier_sizes().user_patterns, 2);
        assert!(store.is_sensitive("ProjectSecret"));
        assert!(store.is_sensitive("Code123"));
        assert!(!store.is_sensitive("Project X"));
    }

    #[test]
    fn test_user_pattern_removal_restores_prior_state() {
        let store = store();
        let inputs = ["ProjectSecret", "Hello World", "090-1234-5678", "acme"];
        let before: Vec<bool> = inputs.iter().map(|t| store.is_sensitive(t)).collect();

        store.load_user_patterns(&[r"Project\s*Secret"]);
        assert!(store.is_sensitive("ProjectSecret"));

        store.load_user_patterns::<&str>(&[]);
        let after: Vec<bool> = inputs.iter().map(|t| store.is_sensitive(t)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_swaps() {
        let store = store();
        store.set_keywords(&["ACME"]);
        let snapshot = store.snapshot();
        store.set_keywords::<&str>(&[]);
        assert!(snapshot.is_sensitive("acme"));
        assert!(!store.is_sensitive("acme"));
    }

    #[test]
    fn test_tier_order_does_not_change_outcome() {
        let forward = store();
        forward.set_keywords(&["ACME", "Globex"]);
        let reverse = store();
        reverse.set_keywords(&["Globex", "ACME"]);
        for text in ["acme", "globex", "initech", "A C M E"] {
            assert_eq!(forward.is_sensitive(text), reverse.is_sensitive(text));
        }
    }
}
