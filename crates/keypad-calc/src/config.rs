//! Calculator configuration
//!
//! Layered as defaults, then an optional YAML file, then environment
//! variables. Front ends apply their own flags last.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default compute endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api";

/// Environment variable overriding the compute endpoint
pub const ENDPOINT_ENV_VAR: &str = "KEYPAD_CALC_ENDPOINT";

/// Environment variable overriding the history store path
pub const STORE_ENV_VAR: &str = "KEYPAD_CALC_STORE";

/// Environment variable setting a request timeout in milliseconds
pub const TIMEOUT_ENV_VAR: &str = "KEYPAD_CALC_TIMEOUT_MS";

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Base URL of the compute endpoint
    pub endpoint: String,
    /// File backing the persisted history
    pub store_path: PathBuf,
    /// Per-request timeout. `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            store_path: default_store_path(),
            request_timeout_ms: None,
        }
    }
}

/// `~/.keypad-calc/history.json`, or relative to the working directory
/// when there is no home directory
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".keypad-calc")
        .join("history.json")
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compute endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the history store path
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_request_timeout_ms(mut self, ms: Option<u64>) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Parse YAML. Missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| CalcError::config(e.to_string()))
    }

    /// Load a YAML file
    pub fn from_yaml_file(path: &Path) -> CalcResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CalcError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> CalcResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are
    /// treated as unset; a timeout that is not a whole number is an error
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CalcResult<Self> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).filter(|v| !v.is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(path) = lookup(STORE_ENV_VAR).filter(|v| !v.is_empty()) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV_VAR).filter(|v| !v.is_empty()) {
            let ms = timeout.trim().parse::<u64>().map_err(|e| {
                CalcError::config(format!("{TIMEOUT_ENV_VAR}={timeout:?}: {e}"))
            })?;
            self.request_timeout_ms = Some(ms);
        }
        Ok(self)
    }

    /// Checks the endpoint looks like an HTTP URL
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(CalcError::config(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(CalcError::config("request timeout must be positive"));
        }
        Ok(())
    }
}
