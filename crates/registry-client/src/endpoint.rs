//! The registry endpoint capability.

use async_trait::async_trait;
use registry_catalog::{
    ArtifactCoords, Classification, ExtensionCatalog, Platform, PlatformCatalog,
};

use crate::error::{Error, Result};

/// One enabled, reachable registry.
///
/// Endpoints are shared read-only between concurrent queries of one
/// resolution, so implementations must be safe to call concurrently.
#[async_trait]
pub trait RegistryEndpoint: Send + Sync {
    /// Registry id, used in diagnostics and conflict reports.
    fn id(&self) -> &str;

    /// Whether this registry provides the platform BOM.
    fn classify_platform(&self, bom: &ArtifactCoords) -> Classification;

    /// Whether this registry provides extensions for the runtime core version.
    fn classify_runtime_version(&self, runtime_core_version: &str) -> Classification;

    /// The registry's platforms, optionally scoped to one runtime core
    /// version. `None` when the registry has nothing to offer.
    async fn resolve_platform_catalog(
        &self,
        runtime_core_version: Option<&str>,
    ) -> Result<Option<PlatformCatalog>>;

    /// The registry's recommended platform.
    async fn resolve_default_platform(&self) -> Result<Platform> {
        let catalog = self.resolve_platform_catalog(None).await?;
        catalog
            .as_ref()
            .and_then(|c| c.default_platform().or_else(|| c.platforms.first()))
            .cloned()
            .ok_or_else(|| Error::NoDefaultPlatform {
                registry: self.id().to_string(),
            })
    }

    /// Extension catalog of a platform BOM. Fails when the BOM is unknown.
    async fn resolve_platform_extensions(&self, bom: &ArtifactCoords) -> Result<ExtensionCatalog>;

    /// Extensions for the runtime core version that belong to no platform.
    async fn resolve_non_platform_extensions(
        &self,
        runtime_core_version: &str,
    ) -> Result<Option<ExtensionCatalog>>;
}
