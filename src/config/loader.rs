//! Configuration File Loading
//!
//! Finds `config.toml` in the usual places, parses it and validates the
//! result. A missing file is not an error unless the caller asks for one.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "WEBTERM_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration file loader
pub struct ConfigLoader {
    /// Candidate files, checked in order
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader over the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    /// Create a loader over an explicit list of candidate files
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Load configuration from the default locations, falling back to defaults
    pub fn load() -> Result<Config> {
        Self::new().find_and_load()
    }

    /// Load one specific file. Unlike [`ConfigLoader::load`], absence is an error.
    pub fn load_from_path(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(Error::ConfigNotFound);
        }
        Self::load_file(path)
    }

    /// Walk the search paths and load the first file that exists
    pub fn find_and_load(&self) -> Result<Config> {
        for path in &self.search_paths {
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                return Self::load_file(path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Candidate files in priority order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            if !explicit.trim().is_empty() {
                paths.push(PathBuf::from(explicit));
            }
        }

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("webterm").join(CONFIG_FILE_NAME));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let candidate = config_dir.join("webterm").join(CONFIG_FILE_NAME);
            if !paths.contains(&candidate) {
                paths.push(candidate);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".webterm").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
