//! Registries configuration model.
//!
//! # Example TOML
//!
//! ```toml
//! debug = false
//!
//! [[registries]]
//! id = "registry.acme.io"
//! catalog = "acme-registry.json"
//!
//! [registries.runtime-versions]
//! recognized = '^3\..*'
//! exclusive-provider = true
//!
//! [[registries]]
//! id = "community.example.org"
//! enabled = false
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Registry kind served by the built-in client factory.
pub const STATIC_KIND: &str = "static";

/// The ordered list of registries a resolver consults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistriesConfig {
    /// Enables debug level diagnostics.
    #[serde(default)]
    pub debug: bool,
    /// Registries in priority order.
    #[serde(default)]
    pub registries: Vec<RegistryConfig>,
}

impl RegistriesConfig {
    pub fn new(registries: Vec<RegistryConfig>) -> Self {
        Self {
            debug: false,
            registries,
        }
    }

    /// Registries that are not disabled, in configured order.
    pub fn enabled(&self) -> impl Iterator<Item = &RegistryConfig> {
        self.registries.iter().filter(|r| r.enabled)
    }

    /// Reject empty and duplicate registry ids.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (position, registry) in self.registries.iter().enumerate() {
            if registry.id.trim().is_empty() {
                return Err(Error::EmptyRegistryId { position });
            }
            if !seen.insert(registry.id.as_str()) {
                return Err(Error::DuplicateRegistry {
                    id: registry.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Resolve relative catalog paths against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for registry in &mut self.registries {
            if let Some(catalog) = registry.catalog.as_mut()
                && catalog.is_relative()
            {
                *catalog = base.join(&*catalog);
            }
        }
    }
}

/// One configured registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    /// Unique registry id, used in diagnostics and conflict reports.
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Transport used to reach the registry.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Registry document backing a static registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub runtime_versions: RuntimeVersionsConfig,
    #[serde(default)]
    pub platforms: PlatformsConfig,
    #[serde(default)]
    pub non_platform_extensions: NonPlatformExtensionsConfig,
    /// Transport specific settings.
    #[serde(default, flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

fn default_kind() -> String {
    STATIC_KIND.to_string()
}

impl RegistryConfig {
    /// An enabled static registry with no classification rules.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            kind: default_kind(),
            catalog: None,
            runtime_versions: RuntimeVersionsConfig::default(),
            platforms: PlatformsConfig::default(),
            non_platform_extensions: NonPlatformExtensionsConfig::default(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Which runtime core versions a registry answers for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeVersionsConfig {
    /// Regular expression a version must fully match. Every version is
    /// recognized when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognized: Option<String>,
    /// Claim exclusivity over the recognized versions.
    #[serde(default)]
    pub exclusive_provider: bool,
}

/// Which platform BOMs a registry answers for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformsConfig {
    /// BOM group ids the registry provides. Every BOM is recognized when
    /// empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognized_group_ids: Vec<String>,
    #[serde(default)]
    pub exclusive_provider: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NonPlatformExtensionsConfig {
    /// Skip the registry's non-platform extension catalogs.
    #[serde(default)]
    pub disabled: bool,
}
