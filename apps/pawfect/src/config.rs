//! # Runtime Configuration
//!
//! Timings and switches for the site runtime, read from a TOML file.
//!
//! ```toml
//! submit_latency_ms = 2000
//! banner_display_ms = 5000
//! notify_on_submit = true
//! ```
//!
//! Every key is optional; unknown keys are rejected. The file is taken from
//! `--config`, else from `PAWFECT_CONFIG`; a missing file means defaults.

use pawfect_core::PawfectError;
use pawfect_core::primitives::{
    BANNER_DISPLAY_MS, MAP_INIT_DELAY_MS, NOTIFICATION_DISPLAY_MS, PAGE_FADE_DELAY_MS,
    SUBMIT_LATENCY_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "PAWFECT_CONFIG";

/// Maximum configuration file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Simulated delivery latency.
    pub submit_latency_ms: u64,
    /// How long the success banner stays up.
    pub banner_display_ms: u64,
    /// How long a floating notice stays up.
    pub notification_display_ms: u64,
    pub page_fade_delay_ms: u64,
    pub map_init_delay_ms: u64,
    /// Search input debounce; 0 searches on every keystroke.
    pub search_debounce_ms: u64,
    /// Also raise a floating notice when a submission completes.
    pub notify_on_submit: bool,
    /// Make the simulated transport report failure.
    pub simulate_failure: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            submit_latency_ms: SUBMIT_LATENCY_MS,
            banner_display_ms: BANNER_DISPLAY_MS,
            notification_display_ms: NOTIFICATION_DISPLAY_MS,
            page_fade_delay_ms: PAGE_FADE_DELAY_MS,
            map_init_delay_ms: MAP_INIT_DELAY_MS,
            search_debounce_ms: 0,
            notify_on_submit: false,
            simulate_failure: false,
        }
    }
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PawfectError> {
        toml::from_str(text).map_err(|e| PawfectError::ConfigError(e.to_string()))
    }

    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PawfectError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }
        let metadata = std::fs::metadata(path)
            .map_err(|e| PawfectError::IoError(format!("Cannot read config metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(PawfectError::ConfigError(format!(
                "config file is {} bytes, limit is {}",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| PawfectError::IoError(format!("Cannot read config file: {}", e)))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from the explicit path if given, else from `PAWFECT_CONFIG`,
    /// else return the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, PawfectError> {
        match explicit {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => Self::load(&PathBuf::from(path)),
                None => Ok(Self::default()),
            },
        }
    }

    #[must_use]
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    #[must_use]
    pub fn banner_display(&self) -> Duration {
        Duration::from_millis(self.banner_display_ms)
    }

    #[must_use]
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    #[must_use]
    pub fn page_fade_delay(&self) -> Duration {
        Duration::from_millis(self.page_fade_delay_ms)
    }

    #[must_use]
    pub fn map_init_delay(&self) -> Duration {
        Duration::from_millis(self.map_init_delay_ms)
    }

    /// `None` when searches run immediately.
    #[must_use]
    pub fn search_debounce(&self) -> Option<Duration> {
        (self.search_debounce_ms > 0).then(|| Duration::from_millis(self.search_debounce_ms))
    }
}
