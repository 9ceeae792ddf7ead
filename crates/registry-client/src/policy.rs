//! Classification rules derived from a registry's configuration.

use regex::Regex;
use registry_catalog::{ArtifactCoords, Classification};
use registry_config::RegistryConfig;

use crate::error::{Error, Result};

/// Decides which platform and runtime version queries a registry answers.
///
/// Runtime versions: without a `recognized` pattern every version is
/// recognized; otherwise a version must fully match the pattern and is then
/// claimed exclusively when the registry is configured as exclusive provider.
///
/// Platforms: without recognized group ids every BOM is recognized;
/// otherwise the BOM group id must be listed and exclusivity follows the
/// platforms configuration.
#[derive(Debug, Clone, Default)]
pub struct RegistryPolicy {
    runtime_versions: Option<Regex>,
    runtime_exclusive: bool,
    platform_groups: Vec<String>,
    platform_exclusive: bool,
    non_platform_disabled: bool,
}

impl RegistryPolicy {
    /// A policy recognizing every query without claiming exclusivity.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let runtime_versions = config
            .runtime_versions
            .recognized
            .as_deref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::InvalidPattern {
                    registry: config.id.clone(),
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            runtime_versions,
            runtime_exclusive: config.runtime_versions.exclusive_provider,
            platform_groups: config.platforms.recognized_group_ids.clone(),
            platform_exclusive: config.platforms.exclusive_provider,
            non_platform_disabled: config.non_platform_extensions.disabled,
        })
    }

    pub fn classify_runtime_version(&self, version: &str) -> Classification {
        let Some(pattern) = &self.runtime_versions else {
            return Classification::Recognized;
        };
        if !pattern.is_match(version) {
            return Classification::NotRecognized;
        }
        if self.runtime_exclusive {
            Classification::ExclusiveProvider
        } else {
            Classification::Recognized
        }
    }

    pub fn classify_platform(&self, bom: &ArtifactCoords) -> Classification {
        if self.platform_groups.is_empty() {
            return Classification::Recognized;
        }
        if !self.platform_groups.iter().any(|g| g == &bom.group_id) {
            return Classification::NotRecognized;
        }
        if self.platform_exclusive {
            Classification::ExclusiveProvider
        } else {
            Classification::Recognized
        }
    }

    /// Whether non-platform extension catalogs should be served.
    pub fn non_platform_extensions_enabled(&self) -> bool {
        !self.non_platform_disabled
    }
}
