//! Configuration handling for the TUI

use crate::backend::DEFAULT_SIGN_IN_DELAY;
use crate::schema::LoginVariant;
use crate::state::View;
use crate::submit::DEFAULT_TIMEOUT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides where saved products are written
pub const DATA_DIR_ENV: &str = "SHOPFORM_DATA_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Screen shown at startup
    pub start_screen: Option<View>,
    /// Which sign-in form to show
    pub login_variant: Option<LoginVariant>,
    /// Upper bound for a single save call
    pub submit_timeout_secs: Option<u64>,
    /// Simulated sign-in round trip
    pub sign_in_delay_ms: Option<u64>,
    /// Where saved products are written
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "shopform", "shopform-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, writing a default one on first run
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&content)?);
        }

        let config = Self::default();
        // Best effort
        match config.save(path) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not write default config"
            ),
        }
        Ok(config)
    }

    /// Write configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn start_screen(&self) -> View {
        self.start_screen.unwrap_or_default()
    }

    pub fn login_variant(&self) -> LoginVariant {
        self.login_variant.unwrap_or_default()
    }

    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
            .max(Duration::from_secs(1))
    }

    pub fn sign_in_delay(&self) -> Duration {
        self.sign_in_delay_ms
            .map_or(DEFAULT_SIGN_IN_DELAY, Duration::from_millis)
    }

    /// Data directory: env override, then config, then the platform data dir
    pub fn data_dir(&self) -> PathBuf {
        Self::resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), self)
    }

    fn resolve_data_dir(env: Option<PathBuf>, config: &AppConfig) -> PathBuf {
        env.or_else(|| config.data_dir.clone())
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".shopform"))
    }
}
