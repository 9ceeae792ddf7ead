//! Platform releases and platform catalogs.

use serde::{Deserialize, Serialize};

use crate::coords::ArtifactCoords;

/// One platform release, identified by its BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Platform {
    /// Bill of materials of the release.
    pub bom: ArtifactCoords,
    /// Runtime core version the release is built on.
    pub runtime_core_version: String,
    /// Runtime core version the release is aligned with, if it evolves an
    /// earlier or alternate runtime line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_runtime_core_version: Option<String>,
}

impl Platform {
    pub fn new(bom: ArtifactCoords, runtime_core_version: impl Into<String>) -> Self {
        Self {
            bom,
            runtime_core_version: runtime_core_version.into(),
            upstream_runtime_core_version: None,
        }
    }

    /// Declare the upstream runtime core version (builder pattern).
    pub fn with_upstream(mut self, version: impl Into<String>) -> Self {
        self.upstream_runtime_core_version = Some(version.into());
        self
    }
}

/// Ordered platforms offered by a registry, plus the recommended default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformCatalog {
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// BOM of the recommended platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<ArtifactCoords>,
}

impl PlatformCatalog {
    pub fn new(platforms: Vec<Platform>, default_platform: Option<ArtifactCoords>) -> Self {
        Self {
            platforms,
            default_platform,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// The listed platform whose BOM is the catalog default.
    pub fn default_platform(&self) -> Option<&Platform> {
        let default = self.default_platform.as_ref()?;
        self.platforms.iter().find(|p| &p.bom == default)
    }

    /// Platforms built on the given runtime core version, keeping the
    /// default when it is among them and otherwise falling back to the first
    /// remaining platform.
    pub fn for_runtime_version(&self, version: &str) -> PlatformCatalog {
        let platforms: Vec<Platform> = self
            .platforms
            .iter()
            .filter(|p| p.runtime_core_version == version)
            .cloned()
            .collect();
        let default_platform = self
            .default_platform
            .as_ref()
            .filter(|d| platforms.iter().any(|p| &p.bom == *d))
            .cloned()
            .or_else(|| platforms.first().map(|p| p.bom.clone()));
        PlatformCatalog::new(platforms, default_platform)
    }
}
