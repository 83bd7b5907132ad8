//! # frontdesk-settings
//!
//! Runtime settings for the Frontdesk engine, loaded from three layers
//! (in priority order):
//!
//! 1. **Compiled defaults** — [`FrontdeskSettings::default()`]
//! 2. **Settings file** — `~/.frontdesk/settings.json` (deep-merged over
//!    defaults)
//! 3. **Environment variables** — `FRONTDESK_*` overrides (highest priority)
//!
//! These are operator settings (delegate endpoint, limits, command prefix),
//! not the per-tenant business configuration — that lives in the store and
//! is read per orchestration call.
//!
//! The global singleton is reloadable: writing new values to disk and
//! calling [`reload_settings_from_path`] swaps the cached value so all
//! subsequent [`get_settings`] calls return fresh data.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::path::Path;
use std::sync::{Arc, RwLock};

/// Global settings singleton.
///
/// Uses `RwLock<Option<Arc<FrontdeskSettings>>>` instead of `OnceLock` so
/// the cached value can be swapped after a reload. Reads are cheap (shared
/// lock + `Arc::clone`); writes only happen on reload.
static SETTINGS: RwLock<Option<Arc<FrontdeskSettings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads from `~/.frontdesk/settings.json` with env var
/// overrides; on failure, falls back to compiled defaults. Returns an
/// `Arc` so callers hold a consistent snapshot even if another thread
/// reloads concurrently.
pub fn get_settings() -> Arc<FrontdeskSettings> {
    // Fast path: read lock
    {
        let guard = SETTINGS.read().expect("settings lock poisoned");
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    // Slow path: first access, take write lock
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    // Double-check after acquiring write lock (another thread may have initialized)
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            FrontdeskSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Useful for tests and startup
/// paths where the settings are already in hand.
pub fn init_settings(settings: FrontdeskSettings) {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path.
///
/// Reads the file, deep-merges over defaults, applies env overrides, and
/// atomically swaps the global cache.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "settings reload failed, keeping defaults");
            FrontdeskSettings::default()
        }
    });
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(new);
}
