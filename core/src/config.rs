//! Persisted configuration: the API token, the selected project, and an
//! optional base-URL override.
//!
//! # Design
//! `ConfigStore` is the sole owner of the settings file; the API client and
//! any UI glue go through it rather than reading the file themselves. Every
//! operation reads the file fresh, so concurrent callers get last-write-wins
//! semantics and must tolerate stale reads between a `save_all` and a later
//! `get_all`. Setters follow the soft-fail contract: on any persistence
//! error they log a warning and return `false` instead of raising, because
//! their callers are UI event handlers with nothing better to do with an
//! error value.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Project;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the platform config directory")]
    NoConfigDir,
}

/// Every persisted field, each absent until set. Unknown or missing fields
/// in the file degrade to `None` rather than failing the read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_token: Option<String>,
    pub selected_project: Option<Project>,
    pub base_url: Option<String>,
}

/// A partial update for `save_all`: only `Some` fields are written, the rest
/// keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub api_token: Option<String>,
    pub selected_project: Option<Project>,
    pub base_url: Option<String>,
}

/// Result of `validate`: which required fields are absent, by the name the
/// settings page shows for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub missing: Vec<String>,
}

/// File-backed store for the extension's settings.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location (`<config dir>/pockets/settings.json`).
    pub fn open_default() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join("pockets").join("settings.json")))
    }

    /// Never fails: a missing or unreadable file is an empty configuration.
    fn read(&self) -> Settings {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Settings::default(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!(
                "settings file {} is malformed, treating as empty: {e}",
                self.path.display()
            );
            Settings::default()
        })
    }

    fn write(&self, settings: &Settings) -> bool {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(settings)?;
            fs::write(&self.path, raw)
        })();
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("failed to write settings to {}: {e}", self.path.display());
                false
            }
        }
    }

    /// The stored API token. An empty string counts as absent.
    pub fn token(&self) -> Option<String> {
        self.read().api_token.filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> bool {
        self.save_all(&SettingsPatch {
            api_token: Some(token.to_string()),
            ..SettingsPatch::default()
        })
    }

    pub fn selected_project(&self) -> Option<Project> {
        self.read().selected_project
    }

    pub fn set_selected_project(&self, project: &Project) -> bool {
        self.save_all(&SettingsPatch {
            selected_project: Some(project.clone()),
            ..SettingsPatch::default()
        })
    }

    /// The stored base-URL override, if any. When absent the client falls
    /// back to `DEFAULT_BASE_URL`.
    pub fn base_url(&self) -> Option<String> {
        self.read().base_url.filter(|u| !u.is_empty())
    }

    /// Single read of every field. A field missing from the file is `None`;
    /// this never partially fails.
    pub fn get_all(&self) -> Settings {
        self.read()
    }

    /// Merge `patch` into the stored settings. Fields omitted from the patch
    /// are left untouched, not cleared. Idempotent.
    pub fn save_all(&self, patch: &SettingsPatch) -> bool {
        let mut settings = self.read();
        if let Some(token) = &patch.api_token {
            settings.api_token = Some(token.clone());
        }
        if let Some(project) = &patch.selected_project {
            settings.selected_project = Some(project.clone());
        }
        if let Some(url) = &patch.base_url {
            settings.base_url = Some(url.clone());
        }
        self.write(&settings)
    }

    /// Erase every persisted field unconditionally. Irreversible.
    pub fn clear_all(&self) -> bool {
        self.write(&Settings::default())
    }

    /// True iff the token and the selected project are both present and
    /// non-empty. Entry points check this before attempting any save.
    pub fn is_configured(&self) -> bool {
        self.validate().valid
    }

    /// Same predicate as `is_configured`, itemizing the absent fields so the
    /// UI can render actionable text.
    pub fn validate(&self) -> Validation {
        let settings = self.read();
        let mut missing = Vec::new();
        if settings.api_token.as_deref().map_or(true, str::is_empty) {
            missing.push("API Key".to_string());
        }
        if settings.selected_project.is_none() {
            missing.push("Project ID".to_string());
        }
        Validation {
            valid: missing.is_empty(),
            missing,
        }
    }
}
