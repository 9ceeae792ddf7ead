//! Locating the user's registries configuration.
//!
//! Lookup order:
//!
//! 1. the file named by the `PLATFORM_REGISTRY_CONFIG` environment variable
//! 2. `~/.platform-registry/config.{toml,yaml,yml,json}`
//! 3. an empty configuration

use std::path::PathBuf;

use crate::error::Result;
use crate::loader::load_config;
use crate::model::RegistriesConfig;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "PLATFORM_REGISTRY_CONFIG";

/// Directory under the home directory holding the user configuration.
pub const CONFIG_DIR: &str = ".platform-registry";

const CONFIG_FILES: &[&str] = &["config.toml", "config.yaml", "config.yml", "config.json"];

/// Finds the configuration file to use when none is given explicitly.
#[derive(Debug, Clone)]
pub struct RegistriesConfigLocator {
    explicit: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl RegistriesConfigLocator {
    /// Locator reading the environment and the user's home directory.
    pub fn new() -> Self {
        Self {
            explicit: std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    /// Override the explicitly requested configuration file.
    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Override the home directory searched for a user configuration.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Path of the configuration file that would be loaded, if any.
    ///
    /// An explicit path is returned even when it does not exist so that
    /// loading reports it.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }
        let dir = self.home.as_ref()?.join(CONFIG_DIR);
        CONFIG_FILES
            .iter()
            .map(|file| dir.join(file))
            .find(|path| path.is_file())
    }

    /// Load the located configuration, or an empty one when none exists.
    pub fn resolve(&self) -> Result<RegistriesConfig> {
        match self.locate() {
            Some(path) => load_config(&path),
            None => {
                tracing::debug!("No registries configuration found, using an empty one");
                Ok(RegistriesConfig::default())
            }
        }
    }
}

impl Default for RegistriesConfigLocator {
    fn default() -> Self {
        Self::new()
    }
}
