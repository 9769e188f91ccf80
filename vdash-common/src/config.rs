//! Configuration loading for the dashboard services
//!
//! Values are resolved in priority order:
//! 1. Command-line argument (highest, applied by the binary via clap)
//! 2. Environment variable (`VDASH_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default base URL of the voice-assistant backend
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
/// Default listen port of the review service
pub const DEFAULT_LISTEN_PORT: u16 = 5730;
/// Default auto-save debounce delay (milliseconds)
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 2000;
/// Default number of pending edits per save request
pub const DEFAULT_SAVE_BATCH_SIZE: usize = 10;
/// Default rows per page in the filtered view
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Review service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Base URL of the backend dataset API
    pub backend_url: String,
    /// Port the review service listens on
    pub listen_port: u16,
    /// Auto-save debounce delay in milliseconds
    pub autosave_delay_ms: u64,
    /// Pending edits per batch_update request
    pub save_batch_size: usize,
    /// Rows per page in the filtered view
    pub page_size: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            save_batch_size: DEFAULT_SAVE_BATCH_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ReviewConfig {
    /// Load configuration from the TOML config file (if any), then apply
    /// environment variable overrides. CLI overrides are applied by the
    /// binary on top of the returned value.
    pub fn load() -> Self {
        let mut config = match find_config_file() {
            Some(path) => match load_from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            None => Self::default(),
        };
        config.apply_env_overrides();
        config
    }

    /// Validate resolved values before the service starts
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(Error::Config("backend_url must not be empty".to_string()));
        }
        if self.save_batch_size == 0 {
            return Err(Error::Config("save_batch_size must be at least 1".to_string()));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("VDASH_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Ok(port) = std::env::var("VDASH_LISTEN_PORT") {
            match port.parse() {
                Ok(port) => self.listen_port = port,
                Err(_) => tracing::warn!("Ignoring invalid VDASH_LISTEN_PORT: {port}"),
            }
        }
        if let Ok(delay) = std::env::var("VDASH_AUTOSAVE_DELAY_MS") {
            match delay.parse() {
                Ok(delay) => self.autosave_delay_ms = delay,
                Err(_) => tracing::warn!("Ignoring invalid VDASH_AUTOSAVE_DELAY_MS: {delay}"),
            }
        }
    }
}

/// Parse a config file into a ReviewConfig
pub fn load_from_file(path: &std::path::Path) -> Result<ReviewConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

/// Locate the platform config file, user dir first then system dir
fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("vdash").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system = PathBuf::from("/etc/vdash/config.toml");
        if system.exists() {
            return Some(system);
        }
    }
    None
}
