//! Settings loading: file layer, deep merge, and env overrides.

use std::env;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::FrontdeskSettings;

/// Default settings file location: `~/.frontdesk/settings.json`.
pub fn settings_path() -> Result<PathBuf> {
    let home = env::var_os("HOME").ok_or(SettingsError::NoHome)?;
    Ok(PathBuf::from(home).join(".frontdesk").join("settings.json"))
}

/// Load settings from the default path with env overrides.
///
/// A missing file is not an error — defaults apply and env overrides still
/// run on top.
pub fn load_settings() -> Result<FrontdeskSettings> {
    let path = settings_path()?;
    if path.exists() {
        load_settings_from_path(&path)
    } else {
        debug!(path = %path.display(), "no settings file, using defaults");
        let mut settings = FrontdeskSettings::default();
        apply_env_overrides(&mut settings);
        Ok(settings)
    }
}

/// Load settings from a specific file, deep-merged over compiled defaults,
/// then apply env overrides.
pub fn load_settings_from_path(path: &Path) -> Result<FrontdeskSettings> {
    let raw = std::fs::read_to_string(path)?;
    let file_value: Value = serde_json::from_str(&raw)?;

    let mut merged = serde_json::to_value(FrontdeskSettings::default())?;
    deep_merge(&mut merged, file_value);

    let mut settings: FrontdeskSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key-wise; any other overlay value (including `null`)
/// replaces the base value wholesale.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        let _ = base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

/// Apply `FRONTDESK_*` environment overrides (highest priority layer).
fn apply_env_overrides(settings: &mut FrontdeskSettings) {
    if let Ok(url) = env::var("FRONTDESK_DELEGATE_BASE_URL") {
        settings.delegate.base_url = url;
    }
    if let Ok(key) = env::var("FRONTDESK_DELEGATE_API_KEY") {
        settings.delegate.api_key = if key.is_empty() { None } else { Some(key) };
    }
    if let Ok(model) = env::var("FRONTDESK_DELEGATE_MODEL") {
        settings.delegate.model = model;
    }
    if let Ok(secs) = env::var("FRONTDESK_DELEGATE_TIMEOUT_SECS")
        && let Ok(secs) = secs.parse()
    {
        settings.delegate.timeout_secs = secs;
    }
    if let Ok(limit) = env::var("FRONTDESK_HISTORY_LIMIT")
        && let Ok(limit) = limit.parse()
    {
        settings.conversation.history_limit = limit;
    }
    if let Ok(prefix) = env::var("FRONTDESK_COMMAND_PREFIX")
        && !prefix.is_empty()
    {
        settings.conversation.command_prefix = prefix;
    }
    if let Ok(level) = env::var("FRONTDESK_LOG_LEVEL") {
        settings.logging.level = level;
    }
}
