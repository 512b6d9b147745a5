// shutter-core/tests/rule_store_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use shutter_core::{rule_fingerprint, RuleStore, RuleTier, UserRuleFile, MAX_PATTERN_LENGTH};

fn spaced(word: &str, gap: &str) -> String {
    word.chars().map(String::from).collect::<Vec<_>>().join(gap)
}

#[test]
fn test_fixed_tier_scenarios() -> Result<()> {
    let store = RuleStore::new()?;
    assert!(store.is_sensitive("090-1234-5678"));
    assert!(!store.is_sensitive("Hello World"));
    Ok(())
}

#[test]
fn test_keyword_scenarios() -> Result<()> {
    let store = RuleStore::new()?;
    store.set_keywords(&["ACME"]);

    assert!(store.is_sensitive("A C M E Corp"));
    assert!(store.is_sensitive("acme"));
    assert!(!store.is_sensitive("AMCE"));

    let hit = store.find_match("a  c m e").expect("keyword should fire");
    assert_eq!(hit.tier, RuleTier::Keyword);
    assert_eq!(hit.label, "ACME");
    Ok(())
}

#[test]
fn test_keyword_whitespace_tolerance_for_many_words() -> Result<()> {
    let store = RuleStore::new()?;
    let words = ["Initech", "Umbrella", "Tyrell", "Cyberdyne"];
    store.set_keywords(&words);

    for word in words {
        for gap in ["", " ", "  ", "\t", " \n "] {
            let text = spaced(word, gap);
            assert!(store.is_sensitive(&text), "{text:?} should match {word}");
            assert!(store.is_sensitive(&text.to_uppercase()));
            assert!(store.is_sensitive(&text.to_lowercase()));
        }
        let reversed: String = word.chars().rev().collect();
        assert!(!store.is_sensitive(&reversed), "{reversed} must not match {word}");
    }
    Ok(())
}

#[test]
fn test_user_pattern_scenarios() -> Result<()> {
    let store = RuleStore::new()?;
    store.load_user_patterns(&[r"Project\s*Secret"]);
    assert!(store.is_sensitive("ProjectSecret"));
    assert!(!store.is_sensitive("Project X"));
    Ok(())
}

#[test_log::test]
fn test_invalid_user_pattern_keeps_other_rules() -> Result<()> {
    let store = RuleStore::new()?;
    store.set_keywords(&["ACME"]);
    store.load_user_patterns(&[r"Project\s*Secret", "(unbalanced", r"Badge-\d+"]);

    assert_eq!(store.tier_sizes().user_patterns, 2);
    assert!(store.is_sensitive("ProjectSecret"));
    assert!(store.is_sensitive("Badge-42"));
    assert!(store.is_sensitive("acme"));
    assert!(store.is_sensitive("090-1234-5678"));
    Ok(())
}

#[test_log::test]
fn test_reload_user_rules_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"patterns:\n  - 'Project\\s*Secret'\n  - '(broken'\n")?;

    let store = RuleStore::new()?;
    assert_eq!(store.reload_user_rules(file.path()), 1);
    assert!(store.is_sensitive("Project  Secret"));
    Ok(())
}

#[test_log::test]
fn test_reload_user_rules_degrades_to_empty_tier() -> Result<()> {
    let store = RuleStore::new()?;
    store.load_user_patterns(&[r"Project\s*Secret"]);

    let mut malformed = NamedTempFile::new()?;
    malformed.write_all(b"patterns: [unterminated\n")?;
    assert_eq!(store.reload_user_rules(malformed.path()), 0);
    assert!(!store.is_sensitive("ProjectSecret"));

    store.load_user_patterns(&[r"Project\s*Secret"]);
    assert_eq!(store.reload_user_rules("/nonexistent/shutter/user_rules.yaml"), 0);
    assert!(!store.is_sensitive("ProjectSecret"));
    Ok(())
}

#[test]
fn test_user_rule_file_save_and_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rules").join("user_rules.yaml");

    let mut file = UserRuleFile::load_or_default(&path)?;
    assert!(file.patterns.is_empty());
    file.add(r"Project\s*Secret");
    file.add(r"社外秘");
    file.save_to_file(&path)?;

    let loaded = UserRuleFile::load_from_file(&path)?;
    assert_eq!(loaded, file);
    Ok(())
}

#[test]
fn test_concurrent_readers_see_complete_tiers() -> Result<()> {
    use std::sync::Arc;
    use std::thread;

    let store = Arc::new(RuleStore::new()?);
    store.set_keywords(&["ACME", "Globex"]);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.snapshot();
                    let sizes = snapshot.sizes();
                    // Each swap installs either both keywords or neither.
                    assert!(sizes.keywords == 0 || sizes.keywords == 2);
                    assert_eq!(snapshot.is_sensitive("acme"), sizes.keywords == 2);
                }
            })
        })
        .collect();

    for i in 0..200 {
        if i % 2 == 0 {
            store.set_keywords::<&str>(&[]);
        } else {
            store.set_keywords(&["ACME", "Globex"]);
        }
    }

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    Ok(())
}

#[test]
fn test_long_user_pattern_stays_active() -> Result<()> {
    let store = RuleStore::new()?;
    let alternation = format!("(?:{})", vec!["alpha"; 120].join("|"));
    assert!(alternation.len() > MAX_PATTERN_LENGTH);

    store.load_user_patterns(&[alternation]);
    assert_eq!(store.tier_sizes().user_patterns, 1);
    assert!(store.is_sensitive("alpha"));
    Ok(())
}

#[test]
fn test_public_label_hides_user_sources() -> Result<()> {
    let store = RuleStore::new()?;
    store.set_keywords(&["山田太郎"]);
    store.load_user_patterns(&[r"Project\s*Secret"]);

    let keyword_hit = store.find_match("担当 山田 太郎").expect("keyword should fire");
    assert_eq!(keyword_hit.public_label(), rule_fingerprint("山田太郎"));

    let pattern_hit = store.find_match("ProjectSecret").expect("pattern should fire");
    assert_eq!(pattern_hit.public_label(), rule_fingerprint(r"Project\s*Secret"));

    let fixed_hit = store.find_match("090-1234-5678").expect("phone should fire");
    assert_eq!(fixed_hit.public_label(), "phone");
    Ok(())
}
