//! Runtime settings: arr endpoints, credentials and handling policy.
//!
//! Settings are shared by every in-flight webhook and replaced wholesale by the
//! admin API. Readers take an `Arc` snapshot and release the lock at once, so
//! a decision always sees one consistent set of settings even if an update
//! lands mid-request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

// ============================================================================
// Policy
// ============================================================================

/// Handling rules applied by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Unmonitor episodes named in a Sonarr notification.
    pub handle_episodes: bool,
    /// Unmonitor or remove the whole series once it is complete.
    pub handle_series: bool,
    /// Only handle a series after it has ended.
    pub handle_series_ended_only: bool,
    /// Add an import list exclusion when deleting a series.
    pub exclude_series: bool,
    /// Delete items instead of unmonitoring them.
    pub remove_media: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            handle_episodes: true,
            handle_series: false,
            handle_series_ended_only: true,
            exclude_series: true,
            remove_media: false,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Persisted settings. Serialized as one flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub radarr_uri: String,
    pub radarr_api_key: String,
    pub sonarr_uri: String,
    pub sonarr_api_key: String,
    #[serde(flatten)]
    pub policy: Policy,
}

impl Settings {
    /// Label shown to admins for the active handling mode.
    pub fn mode(&self) -> &'static str {
        if self.policy.remove_media {
            "Remove Item"
        } else {
            "Unmonitor Only"
        }
    }

    pub fn radarr_configured(&self) -> bool {
        !self.radarr_uri.is_empty() && !self.radarr_api_key.is_empty()
    }

    pub fn sonarr_configured(&self) -> bool {
        !self.sonarr_uri.is_empty() && !self.sonarr_api_key.is_empty()
    }

    /// Trim whitespace and drop trailing slashes from uris.
    pub fn normalized(mut self) -> Self {
        self.radarr_uri = normalize_uri(&self.radarr_uri);
        self.radarr_api_key = self.radarr_api_key.trim().to_string();
        self.sonarr_uri = normalize_uri(&self.sonarr_uri);
        self.sonarr_api_key = self.sonarr_api_key.trim().to_string();
        self
    }
}

fn normalize_uri(uri: &str) -> String {
    uri.trim().trim_end_matches('/').to_string()
}

/// Which parts of the settings an update touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub radarr: bool,
    pub sonarr: bool,
    pub policy: bool,
}

impl SettingsChange {
    pub fn between(old: &Settings, new: &Settings) -> Self {
        Self {
            radarr: old.radarr_uri != new.radarr_uri || old.radarr_api_key != new.radarr_api_key,
            sonarr: old.sonarr_uri != new.sonarr_uri || old.sonarr_api_key != new.sonarr_api_key,
            policy: old.policy != new.policy,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.radarr || self.sonarr || self.policy)
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Shared, swappable settings with optional file persistence.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<Settings>>,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    /// Store that never touches the filesystem.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(settings.normalized())),
            write_lock: Mutex::new(()),
        }
    }

    /// Load settings from `path`.
    ///
    /// A missing or unparseable file falls back to defaults, which are then
    /// written to `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();

        let settings = match fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Loaded settings");
                    Some(settings.normalized())
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Settings file is invalid, resetting to defaults");
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file, writing defaults");
                None
            }
            Err(e) => return Err(SettingsError::Io(e)),
        };

        let settings = match settings {
            Some(settings) => settings,
            None => {
                let defaults = Settings::default();
                write_settings(&path, &defaults).await?;
                defaults
            }
        };

        Ok(Self {
            path: Some(path),
            current: RwLock::new(Arc::new(settings)),
            write_lock: Mutex::new(()),
        })
    }

    /// The current settings. The lock is released before this returns.
    pub async fn snapshot(&self) -> Arc<Settings> {
        self.current.read().await.clone()
    }

    /// Replace the settings wholesale.
    ///
    /// The new settings are persisted before they become visible. Nothing is
    /// written when they equal the current ones.
    pub async fn replace(&self, settings: Settings) -> Result<SettingsChange, SettingsError> {
        let _guard = self.write_lock.lock().await;

        let settings = settings.normalized();
        let current = self.snapshot().await;
        let change = SettingsChange::between(&current, &settings);
        if change.is_empty() {
            return Ok(change);
        }

        if let Some(ref path) = self.path {
            write_settings(path, &settings).await?;
        }
        *self.current.write().await = Arc::new(settings);

        Ok(change)
    }
}

async fn write_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }
    let contents = serde_json::to_string_pretty(settings)?;
    fs::write(path, contents).await?;
    debug!(path = %path.display(), "Saved settings");
    Ok(())
}

// ============================================================================
// SettingsError
// ============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Tests
// ============================================================================
