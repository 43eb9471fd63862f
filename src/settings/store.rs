//! Settings store: load/save user preferences through a `Storage` handle.
//!
//! DESIGN
//! ======
//! The whole `Settings` record is stored as one JSON object under
//! `SETTINGS_KEY`. `Settings::default()` is the single source of truth for
//! the shape: a stored object is shallow-merged onto the defaults, so fields
//! it lacks keep their default and unknown fields are ignored. Data written
//! by older or newer builds still loads.
//!
//! Preferences are non-critical. `load` and `save` absorb every failure:
//! callers always get a usable `Settings` and a save never errors. The
//! `try_*` variants expose the underlying cause for callers that care.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent writers are last-write-wins. There is no lock or merge across
//! writers because each save rewrites the full record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::storage::{Storage, StorageError};

/// Storage key the serialized settings live under.
pub const SETTINGS_KEY: &str = "didlist-settings";

// =============================================================================
// SETTINGS
// =============================================================================

/// User preferences. Always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Ask before leaving a page with unsaved edits.
    pub prompt_to_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { prompt_to_save: true }
    }
}

impl Settings {
    /// Shallow-merge a partial JSON object onto these settings.
    ///
    /// Keys present in `patch` replace the corresponding field; everything
    /// else keeps its current value.
    ///
    /// # Errors
    ///
    /// Returns an error if `patch` is not a JSON object or a known field has
    /// the wrong type.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let serde_json::Value::Object(overrides) = patch else {
            return Err(serde::de::Error::custom("settings patch must be a JSON object"));
        };
        let mut base = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut base {
            for (key, value) in overrides {
                fields.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base)
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no storage backend available")]
    Unavailable,
    #[error("no stored settings")]
    Missing,
    #[error("stored settings are malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to read stored settings: {0}")]
    Read(#[source] StorageError),
    #[error("failed to write settings: {0}")]
    Write(#[source] StorageError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

// =============================================================================
// SETTINGS STORE
// =============================================================================

/// Settings persistence over an injected storage handle.
///
/// A store built with `unavailable()` has no storage context at all (the
/// server-side equivalent of rendering without a browser). Reads silently
/// yield defaults. Writes are skipped with a warning.
#[derive(Clone, Default)]
pub struct SettingsStore {
    storage: Option<Arc<dyn Storage>>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage: Some(storage) }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self { storage: None }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    /// Load settings, reporting why defaults would be needed.
    ///
    /// # Errors
    ///
    /// Returns the reason no stored settings could be used.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let storage = self.storage.as_deref().ok_or(SettingsError::Unavailable)?;
        let raw = storage
            .get_item(SETTINGS_KEY)
            .map_err(SettingsError::Read)?
            .ok_or(SettingsError::Missing)?;
        let stored: serde_json::Value = serde_json::from_str(&raw).map_err(SettingsError::Malformed)?;
        Settings::default()
            .merged(&stored)
            .map_err(SettingsError::Malformed)
    }

    /// Load settings, falling back to defaults on any failure.
    #[must_use]
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(SettingsError::Unavailable) => Settings::default(),
            Err(e) => {
                warn!(error = %e, key = SETTINGS_KEY, "could not load settings; using defaults");
                Settings::default()
            }
        }
    }

    /// Serialize and store the full settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no storage or the write fails.
    pub fn try_save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let storage = self.storage.as_deref().ok_or(SettingsError::Unavailable)?;
        let raw = serde_json::to_string(settings).map_err(SettingsError::Serialize)?;
        storage.set_item(SETTINGS_KEY, &raw).map_err(SettingsError::Write)
    }

    /// Store the full settings record. Failures are logged and dropped.
    pub fn save(&self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            warn!(error = %e, key = SETTINGS_KEY, "could not save settings");
        }
    }

    /// Rewrite the stored record with defaults and return them.
    pub fn reset(&self) -> Settings {
        let defaults = Settings::default();
        self.save(&defaults);
        defaults
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
