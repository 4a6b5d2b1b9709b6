//! Configuration management for webterm
//!
//! Holds the server endpoints, dispatch policy and display settings the
//! session controller runs with. Files are TOML; every field has a default
//! so partial files are fine.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for webterm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote service endpoints
    pub server: ServerConfig,

    /// How submissions are handed to the execution channel
    pub dispatch: DispatchConfig,

    /// Display settings
    pub ui: UiConfig,
}

/// Remote execution and directory service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme, host and port of the service
    pub base_url: String,

    /// Path of the command execution endpoint
    pub execute_path: String,

    /// Path of the working-directory endpoint
    pub cwd_path: String,

    /// Per-request timeout in milliseconds, 0 disables it
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            execute_path: "/execute".to_string(),
            cwd_path: "/cwd".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ServerConfig {
    /// Full URL of the execution endpoint
    pub fn execute_url(&self) -> String {
        join_url(&self.base_url, &self.execute_path)
    }

    /// Full URL of the working-directory endpoint
    pub fn cwd_url(&self) -> String {
        join_url(&self.base_url, &self.cwd_path)
    }

    /// Request timeout, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Submission policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Keep at most one request in flight and queue the rest in FIFO order.
    /// Off by default: overlapping submissions render in arrival order.
    pub serialize_requests: bool,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// chrono format string for the status bar clock
    pub clock_format: String,

    /// Predefined command shortcuts
    pub chips: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            clock_format: "%H:%M:%S".to_string(),
            chips: ["ls", "pwd", "tree", "sysinfo", "history"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL: {0} (must start with http:// or https://)")]
    InvalidBaseUrl(String),

    #[error("Invalid endpoint path for {field}: {path} (must start with '/')")]
    InvalidEndpointPath { field: &'static str, path: String },

    #[error("Clock format must not be empty")]
    EmptyClockFormat,
}

impl Config {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.server.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base.clone()));
        }

        for (field, path) in [
            ("execute_path", &self.server.execute_path),
            ("cwd_path", &self.server.cwd_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidEndpointPath {
                    field,
                    path: path.clone(),
                });
            }
        }

        if self.ui.clock_format.trim().is_empty() {
            return Err(ConfigError::EmptyClockFormat);
        }

        Ok(())
    }
}
