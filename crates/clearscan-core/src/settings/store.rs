//! Settings persistence as a UTF-8 JSON file.
//!
//! An absent settings file means built-in defaults. A file that exists but
//! fails to parse is a hard error and is reported, never silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FilterError;

use super::FilterSettings;

const SETTINGS_FILENAME: &str = "setting.json";

/// Candidate settings paths, in resolution order: explicit path, the
/// `CLEARSCAN_SETTINGS` env var, the working directory, then the platform
/// config directory.
pub fn settings_candidates(custom: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("CLEARSCAN_SETTINGS") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(SETTINGS_FILENAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("clearscan").join(SETTINGS_FILENAME));
    }

    candidates
}

/// First existing settings file, if any. An explicit path wins even when it
/// does not exist yet, so callers can report it precisely.
pub fn resolve_settings_path(custom: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = custom {
        return Some(path.to_path_buf());
    }

    settings_candidates(None)
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// Load settings from disk.
///
/// Without an explicit path, a missing file yields defaults. An explicit
/// path must exist and parse.
pub fn load_settings(custom: Option<&Path>) -> Result<FilterSettings, FilterError> {
    let path = match resolve_settings_path(custom) {
        Some(path) => path,
        None => return Ok(FilterSettings::default()),
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        FilterError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        FilterError::Config(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Save settings as pretty-printed JSON.
pub fn save_settings<P: AsRef<Path>>(
    settings: &FilterSettings,
    path: P,
) -> Result<(), FilterError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| FilterError::Config(format!("failed to serialize settings: {}", e)))?;

    fs::write(path, json).map_err(|e| {
        FilterError::Config(format!("failed to write {}: {}", path.display(), e))
    })
}
