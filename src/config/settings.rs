//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::service::DEFAULT_FAILURE_MESSAGE;

use super::AppPaths;

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Settings for the remote transcription service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the API endpoint (no trailing slash).
    pub base_url: String,
    /// API key — `None` when the deployment needs no authentication
    /// (e.g. a key-injecting proxy).
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"gemini-2.0-flash"`).
    pub model: String,
    /// Maximum seconds to wait for a transcription response.  This is the
    /// only timeout in play; the step itself imposes none.
    pub timeout_secs: u64,
    /// Message shown when a failure carries no usable description.
    /// Kept configurable so a localised deployment can replace it.
    pub fallback_error: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            model: "gemini-2.0-flash".into(),
            timeout_secs: 60,
            fallback_error: DEFAULT_FAILURE_MESSAGE.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Last saved window position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
    /// Keep the window floating above all other windows.
    pub always_on_top: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_position: None,
            always_on_top: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use vidscribe::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote transcription service settings.
    pub service: ServiceConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.service.base_url, loaded.service.base_url);
        assert_eq!(original.service.api_key, loaded.service.api_key);
        assert_eq!(original.service.model, loaded.service.model);
        assert_eq!(original.service.timeout_secs, loaded.service.timeout_secs);
        assert_eq!(
            original.service.fallback_error,
            loaded.service.fallback_error
        );
        assert_eq!(original.ui.always_on_top, loaded.ui.always_on_top);
        assert_eq!(original.ui.window_position, loaded.ui.window_position);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.service.model, default.service.model);
        assert_eq!(config.service.base_url, default.service.base_url);
    }

    /// Verify the shipped defaults.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(
            cfg.service.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(cfg.service.model, "gemini-2.0-flash");
        assert_eq!(cfg.service.timeout_secs, 60);
        assert!(cfg.service.api_key.is_none());
        assert_eq!(cfg.service.fallback_error, "Transcription failed");
        assert!(!cfg.ui.always_on_top);
        assert!(cfg.ui.window_position.is_none());
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.service.base_url = "https://proxy.internal".into();
        cfg.service.api_key = Some("sk-test".into());
        cfg.service.model = "gemini-2.5-pro".into();
        cfg.service.timeout_secs = 120;
        cfg.service.fallback_error = "Falha na transcrição.".into();
        cfg.ui.window_position = Some((100.0, 200.0));
        cfg.ui.always_on_top = true;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.service.base_url, "https://proxy.internal");
        assert_eq!(loaded.service.api_key, Some("sk-test".into()));
        assert_eq!(loaded.service.model, "gemini-2.5-pro");
        assert_eq!(loaded.service.timeout_secs, 120);
        assert_eq!(loaded.service.fallback_error, "Falha na transcrição.");
        assert_eq!(loaded.ui.window_position, Some((100.0, 200.0)));
        assert!(loaded.ui.always_on_top);
    }
}
