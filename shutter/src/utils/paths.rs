// shutter/src/utils/paths.rs
//! Default locations of the persisted keyword list and user rule file.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "shutter";
const KEYWORDS_FILE_NAME: &str = "keywords.json";
const RULES_FILE_NAME: &str = "user_rules.yaml";

/// Per-user configuration directory, falling back to the working directory.
pub fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `explicit` if given, otherwise the default keyword file path.
pub fn keywords_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| app_config_dir().join(KEYWORDS_FILE_NAME))
}

/// Returns `explicit` if given, otherwise the default user rule file path.
pub fn rules_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| app_config_dir().join(RULES_FILE_NAME))
}
