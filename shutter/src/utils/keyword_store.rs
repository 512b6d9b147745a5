// shutter/src/utils/keyword_store.rs
//! Persistence of the user keyword list.
//!
//! The list is stored as a JSON array of strings. Reads take a shared lock,
//! writes go to a sibling temp file under an exclusive lock and are then
//! renamed over the target, so a concurrent reader sees either the old list
//! or the new one.

use anyhow::{Context, Result};
use log::debug;
use shutter_core::KeywordList;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

const KEYWORD_FILE_TMP_SUFFIX: &str = ".tmp";

/// Loads the keyword list. A missing or empty file is an empty list.
pub fn load_keywords(path: &Path) -> Result<KeywordList> {
    if !path.exists() {
        debug!("Keyword file {} does not exist yet.", path.display());
        return Ok(KeywordList::new());
    }

    let mut f = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("Failed to open keyword file {}", path.display()))?;
    fs2::FileExt::lock_shared(&f)?;
    let mut raw = Vec::new();
    f.read_to_end(&mut raw)?;
    fs2::FileExt::unlock(&f)?;

    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(KeywordList::new());
    }

    let list: KeywordList = serde_json::from_slice(&raw).with_context(|| {
        format!(
            "Keyword file {} is not a JSON array of strings",
            path.display()
        )
    })?;
    debug!("Loaded {} keywords from {}.", list.len(), path.display());
    Ok(list)
}

/// Atomically replaces the keyword file with `list`.
pub fn save_keywords(path: &Path, list: &KeywordList) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let json = serde_json::to_vec_pretty(list)?;
    let tmp_path = path.with_extension(format!(
        "{}{}",
        path.extension().map(|s| s.to_string_lossy()).unwrap_or_default(),
        KEYWORD_FILE_TMP_SUFFIX
    ));
    {
        let mut tmp = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs2::FileExt::lock_exclusive(&tmp)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        fs2::FileExt::unlock(&tmp)?;
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace keyword file {}", path.display()))?;
    debug!("Saved {} keywords to {}.", list.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty_list() -> Result<()> {
        let dir = tempdir()?;
        let list = load_keywords(&dir.path().join("nope.json"))?;
        assert!(list.is_empty());
        Ok(())
    }

    #[test]
    fn save_then_load_keeps_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("keywords.json");
        let mut list = KeywordList::new();
        list.add("山田");
        list.add("ACME");
        save_keywords(&path, &list)?;

        assert_eq!(load_keywords(&path)?, list);
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("keywords.json");
        fs::write(&path, "{\"not\": \"a list\"}")?;
        assert!(load_keywords(&path).is_err());
        Ok(())
    }
}
