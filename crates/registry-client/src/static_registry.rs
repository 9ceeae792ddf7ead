//! Registry endpoint backed by a registry document.
//!
//! A registry document lists everything a registry would serve: its
//! platform catalog, one extension catalog per platform BOM and the
//! non-platform extension catalogs per runtime core version.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "platforms": {
//!     "platforms": [
//!       { "bom": "io.acme.platform:acme-bom::pom:3.2.0", "runtime-core-version": "3.2.0" }
//!     ],
//!     "default-platform": "io.acme.platform:acme-bom::pom:3.2.0"
//!   },
//!   "platform-extensions": [
//!     { "id": "acme-3.2", "runtime-core-version": "3.2.0", "platform": true,
//!       "bom": "io.acme.platform:acme-bom::pom:3.2.0" }
//!   ],
//!   "non-platform-extensions": [
//!     { "id": "acme-extras-3.2", "runtime-core-version": "3.2.0" }
//!   ]
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use registry_catalog::{ArtifactCoords, Classification, ExtensionCatalog, PlatformCatalog};
use registry_config::{ConfigFormat, RegistryConfig};
use serde::{Deserialize, Serialize};

use crate::endpoint::RegistryEndpoint;
use crate::error::{Error, Result};
use crate::policy::RegistryPolicy;

/// Everything a static registry serves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryDocument {
    #[serde(default)]
    pub platforms: PlatformCatalog,
    /// Extension catalogs keyed by their `bom`.
    #[serde(default)]
    pub platform_extensions: Vec<ExtensionCatalog>,
    /// Extension catalogs keyed by their runtime core version.
    #[serde(default)]
    pub non_platform_extensions: Vec<ExtensionCatalog>,
}

impl RegistryDocument {
    /// Load a document, detecting the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| {
            registry_config::Error::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(format.parse(&content, path)?)
    }
}

/// Registry endpoint serving a [`RegistryDocument`] from memory.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    id: String,
    policy: RegistryPolicy,
    document: RegistryDocument,
}

impl StaticRegistry {
    pub fn new(id: impl Into<String>, policy: RegistryPolicy, document: RegistryDocument) -> Self {
        Self {
            id: id.into(),
            policy,
            document,
        }
    }

    /// Build from configuration, loading the document named by `catalog`.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let policy = RegistryPolicy::from_config(config)?;
        let path = config.catalog.as_deref().ok_or_else(|| Error::Construction {
            registry: config.id.clone(),
            message: "static registry requires a 'catalog' document".to_string(),
        })?;
        let document = RegistryDocument::load(path).map_err(|e| Error::Construction {
            registry: config.id.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            registry = %config.id,
            platforms = document.platforms.platforms.len(),
            "Loaded static registry document"
        );
        Ok(Self::new(config.id.clone(), policy, document))
    }

    pub fn document(&self) -> &RegistryDocument {
        &self.document
    }
}

#[async_trait]
impl RegistryEndpoint for StaticRegistry {
    fn id(&self) -> &str {
        &self.id
    }

    fn classify_platform(&self, bom: &ArtifactCoords) -> Classification {
        self.policy.classify_platform(bom)
    }

    fn classify_runtime_version(&self, runtime_core_version: &str) -> Classification {
        self.policy.classify_runtime_version(runtime_core_version)
    }

    async fn resolve_platform_catalog(
        &self,
        runtime_core_version: Option<&str>,
    ) -> Result<Option<PlatformCatalog>> {
        let catalog = match runtime_core_version {
            Some(version) => self.document.platforms.for_runtime_version(version),
            None => self.document.platforms.clone(),
        };
        Ok((!catalog.is_empty()).then_some(catalog))
    }

    async fn resolve_platform_extensions(&self, bom: &ArtifactCoords) -> Result<ExtensionCatalog> {
        self.document
            .platform_extensions
            .iter()
            .find(|c| c.bom.as_ref() == Some(bom))
            .cloned()
            .ok_or_else(|| Error::PlatformNotFound {
                registry: self.id.clone(),
                bom: bom.to_string(),
            })
    }

    async fn resolve_non_platform_extensions(
        &self,
        runtime_core_version: &str,
    ) -> Result<Option<ExtensionCatalog>> {
        if !self.policy.non_platform_extensions_enabled() {
            return Ok(None);
        }
        Ok(self
            .document
            .non_platform_extensions
            .iter()
            .find(|c| c.runtime_core_version == runtime_core_version)
            .cloned())
    }
}
