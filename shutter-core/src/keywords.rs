//! The ordered, duplicate-free list of user keywords.
//!
//! Insertion order is kept for display. Matching does not depend on it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordList {
    keywords: Vec<String>,
}

impl KeywordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trimmed keyword. Returns `false` for empty input or a duplicate.
    pub fn add(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.contains(keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn remove(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl From<Vec<String>> for KeywordList {
    /// Keeps the first occurrence of each keyword and drops empty entries.
    fn from(raw: Vec<String>) -> Self {
        let mut list = KeywordList::new();
        for keyword in &raw {
            list.add(keyword);
        }
        list
    }
}

impl From<KeywordList> for Vec<String> {
    fn from(list: KeywordList) -> Self {
        list.keywords
    }
}
