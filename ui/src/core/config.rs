//! Dashboard configuration.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults (`DashboardConfig::default`).
//! 2. Desktop only: `config.json` in the platform config directory.
//! 3. Overrides: `LOADSCOPE_ENDPOINT`, `LOADSCOPE_TIMEOUT_MS`,
//!    `LOADSCOPE_PAGE_SIZE`. Desktop reads them from the process
//!    environment, web bakes them in at compile time.
//!
//! A bad value never aborts startup. It is logged and the previous value is
//! kept.

use std::time::Duration;

use api::ResultClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const ENV_ENDPOINT: &str = "LOADSCOPE_ENDPOINT";
pub const ENV_TIMEOUT_MS: &str = "LOADSCOPE_TIMEOUT_MS";
pub const ENV_PAGE_SIZE: &str = "LOADSCOPE_PAGE_SIZE";

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub endpoint: String,
    pub request_timeout_ms: u64,
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: api::default_endpoint(),
            request_timeout_ms: api::DEFAULT_TIMEOUT.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Resolve the configuration for the running platform.
    pub fn load() -> Self {
        let config = Self::from_file_or_default().with_overrides(platform_override);
        debug!(
            endpoint = %config.endpoint,
            timeout_ms = config.request_timeout_ms,
            page_size = config.page_size,
            "dashboard configuration resolved"
        );
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn client(&self) -> ResultClient {
        ResultClient::new(self.endpoint.clone(), self.request_timeout())
    }

    /// Apply overrides from `lookup` (keyed by the `ENV_*` names).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                warn!("{ENV_ENDPOINT} is empty; keeping {}", self.endpoint);
            } else {
                self.endpoint = endpoint.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.request_timeout_ms = ms,
                _ => warn!("ignoring invalid {ENV_TIMEOUT_MS}={raw:?}"),
            }
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => self.page_size = size,
                _ => warn!("ignoring invalid {ENV_PAGE_SIZE}={raw:?}"),
            }
        }

        self
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file_or_default() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path)
            .map_err(ConfigError::from)
            .and_then(|raw| Self::from_json(&raw))
        {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "falling back to default configuration");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn from_file_or_default() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_file_path() -> Option<std::path::PathBuf> {
    super::platform::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_override(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn platform_override(key: &str) -> Option<String> {
    let value = match key {
        ENV_ENDPOINT => option_env!("LOADSCOPE_ENDPOINT"),
        ENV_TIMEOUT_MS => option_env!("LOADSCOPE_TIMEOUT_MS"),
        ENV_PAGE_SIZE => option_env!("LOADSCOPE_PAGE_SIZE"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_observed_dashboard() {
        let config = DashboardConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(config.endpoint.ends_with("/api/load-test-result"));
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = DashboardConfig::default().with_overrides(lookup(&[
            (ENV_ENDPOINT, "http://localhost:4000/api/load-test-result"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_PAGE_SIZE, "20"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:4000/api/load-test-result");
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn invalid_overrides_keep_previous_values() {
        let config = DashboardConfig::default().with_overrides(lookup(&[
            (ENV_ENDPOINT, "   "),
            (ENV_TIMEOUT_MS, "soon"),
            (ENV_PAGE_SIZE, "0"),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_json_fills_remaining_defaults() {
        let config = DashboardConfig::from_json(r#"{ "page_size": 6 }"#).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.request_timeout_ms, 15_000);
        assert!(DashboardConfig::from_json("not json").is_err());
    }
}
