//! [`MockRegistry`] builder for resolver test scenarios.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use registry_catalog::{
    ArtifactCoords, Classification, ExtensionCatalog, Platform, PlatformCatalog,
};
use registry_client::{Error, RegistryEndpoint, Result};

/// In-memory registry endpoint.
///
/// Every query is recognized unless configured otherwise. Adding a platform
/// also registers an empty extension catalog for its BOM, carrying the
/// platform's runtime and upstream versions.
///
/// # Example
///
/// ```rust
/// use registry_catalog::{ArtifactCoords, Platform};
/// use registry_test_utils::MockRegistry;
///
/// let bom = ArtifactCoords::pom("io.acme.platform", "acme-bom", "3.2.0");
/// let registry = MockRegistry::new("registry.acme.io")
///     .platform(Platform::new(bom.clone(), "3.2.0"))
///     .default_platform(bom);
/// assert!(registry.platform_catalog_queries().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockRegistry {
    id: String,
    platforms: PlatformCatalog,
    platform_extensions: HashMap<ArtifactCoords, ExtensionCatalog>,
    non_platform_extensions: HashMap<String, ExtensionCatalog>,
    runtime_versions: HashMap<String, Classification>,
    platform_classification: Option<Classification>,
    failing_platforms: HashSet<ArtifactCoords>,
    platform_catalog_queries: Mutex<Vec<Option<String>>>,
    platform_extension_queries: Mutex<Vec<ArtifactCoords>>,
    non_platform_queries: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Offer a platform and an empty extension catalog for its BOM.
    pub fn platform(mut self, platform: Platform) -> Self {
        let mut catalog =
            ExtensionCatalog::for_platform(platform.bom.clone(), &platform.runtime_core_version);
        catalog.upstream_runtime_core_version = platform.upstream_runtime_core_version.clone();
        self.platform_extensions.insert(platform.bom.clone(), catalog);
        if self.platforms.default_platform.is_none() {
            self.platforms.default_platform = Some(platform.bom.clone());
        }
        self.platforms.platforms.push(platform);
        self
    }

    /// Recommend a platform. Defaults to the first platform added.
    pub fn default_platform(mut self, bom: ArtifactCoords) -> Self {
        self.platforms.default_platform = Some(bom);
        self
    }

    /// Replace the extension catalog served for its `bom`.
    pub fn platform_extensions(mut self, catalog: ExtensionCatalog) -> Self {
        if let Some(bom) = catalog.bom.clone() {
            self.platform_extensions.insert(bom, catalog);
        }
        self
    }

    /// Serve a non-platform catalog for its runtime core version.
    pub fn non_platform_extensions(mut self, catalog: ExtensionCatalog) -> Self {
        self.non_platform_extensions
            .insert(catalog.runtime_core_version.clone(), catalog);
        self
    }

    /// Classify one runtime core version.
    pub fn runtime_version(mut self, version: impl Into<String>, class: Classification) -> Self {
        self.runtime_versions.insert(version.into(), class);
        self
    }

    /// Classify every platform BOM.
    pub fn platform_classification(mut self, class: Classification) -> Self {
        self.platform_classification = Some(class);
        self
    }

    /// Fail extension resolution for a BOM.
    pub fn failing_platform(mut self, bom: ArtifactCoords) -> Self {
        self.failing_platforms.insert(bom);
        self
    }

    /// Runtime versions the platform catalog was requested for, in order.
    pub fn platform_catalog_queries(&self) -> Vec<Option<String>> {
        lock(&self.platform_catalog_queries).clone()
    }

    pub fn platform_extension_queries(&self) -> Vec<ArtifactCoords> {
        lock(&self.platform_extension_queries).clone()
    }

    pub fn non_platform_queries(&self) -> Vec<String> {
        lock(&self.non_platform_queries).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RegistryEndpoint for MockRegistry {
    fn id(&self) -> &str {
        &self.id
    }

    fn classify_platform(&self, _bom: &ArtifactCoords) -> Classification {
        self.platform_classification
            .unwrap_or(Classification::Recognized)
    }

    fn classify_runtime_version(&self, runtime_core_version: &str) -> Classification {
        self.runtime_versions
            .get(runtime_core_version)
            .copied()
            .unwrap_or(Classification::Recognized)
    }

    async fn resolve_platform_catalog(
        &self,
        runtime_core_version: Option<&str>,
    ) -> Result<Option<PlatformCatalog>> {
        lock(&self.platform_catalog_queries).push(runtime_core_version.map(String::from));
        let catalog = match runtime_core_version {
            Some(version) => self.platforms.for_runtime_version(version),
            None => self.platforms.clone(),
        };
        Ok((!catalog.is_empty()).then_some(catalog))
    }

    async fn resolve_platform_extensions(&self, bom: &ArtifactCoords) -> Result<ExtensionCatalog> {
        lock(&self.platform_extension_queries).push(bom.clone());
        if self.failing_platforms.contains(bom) {
            return Err(Error::Resolution {
                registry: self.id.clone(),
                message: format!("failed to fetch {bom}"),
            });
        }
        self.platform_extensions
            .get(bom)
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
        lock(&self.non_platform_queries).push(runtime_core_version.to_string());
        Ok(self.non_platform_extensions.get(runtime_core_version).cloned())
    }
}
