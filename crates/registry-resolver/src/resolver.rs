//! The catalog resolver.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use registry_catalog::{ArtifactCoords, CatalogMerger, ExtensionCatalog, Platform, PlatformCatalog};
use registry_client::RegistryEndpoint;

use crate::aggregate::merge_platform_catalogs;
use crate::builder::CatalogResolverBuilder;
use crate::error::{Error, Result};
use crate::filter::{registries_for_platform, registries_for_runtime_version};
use crate::version_index::VersionIndex;
use crate::walker::VersionGraphWalker;

/// Resolves platform and extension catalogs across the configured
/// registries.
///
/// Registries are consulted in configured order; the first registry's
/// default platform seeds resolution when no runtime version is requested.
pub struct CatalogResolver {
    pub(crate) registries: Vec<Arc<dyn RegistryEndpoint>>,
    pub(crate) merger: Arc<dyn CatalogMerger>,
    pub(crate) debug: bool,
}

/// Outcome of scanning the only registry's platform catalog.
struct PlatformScan {
    platforms: Vec<Platform>,
    /// Runtime version of the default platform.
    seed_version: String,
    /// Set when every platform is built on the same runtime version and no
    /// platform points upstream of it.
    common_version: Option<String>,
}

impl PlatformScan {
    fn new(catalog: PlatformCatalog) -> Option<Self> {
        let first = catalog.platforms.first()?;
        let seed_version = catalog
            .default_platform()
            .unwrap_or(first)
            .runtime_core_version
            .clone();
        let common = &first.runtime_core_version;
        let common_version = catalog
            .platforms
            .iter()
            .all(|p| {
                &p.runtime_core_version == common
                    && p.upstream_runtime_core_version
                        .as_ref()
                        .is_none_or(|upstream| upstream == common)
            })
            .then(|| common.clone());
        Some(Self {
            platforms: catalog.platforms,
            seed_version,
            common_version,
        })
    }
}

impl CatalogResolver {
    pub fn builder() -> CatalogResolverBuilder {
        CatalogResolverBuilder::new()
    }

    pub fn has_registries(&self) -> bool {
        !self.registries.is_empty()
    }

    /// Ids of the usable registries, in configured order.
    pub fn registry_ids(&self) -> Vec<&str> {
        self.registries.iter().map(|r| r.id()).collect()
    }

    /// Whether the configuration requested debug diagnostics.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Platforms offered by all registries, optionally scoped to one runtime
    /// core version. `None` when no registry offers anything.
    pub async fn resolve_platform_catalog(
        &self,
        runtime_core_version: Option<&str>,
    ) -> Result<Option<PlatformCatalog>> {
        let catalogs = try_join_all(
            self.registries
                .iter()
                .map(|r| r.resolve_platform_catalog(runtime_core_version)),
        )
        .await?;

        let mut catalogs: Vec<PlatformCatalog> = catalogs
            .into_iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .collect();

        Ok(match catalogs.len() {
            0 => None,
            1 => catalogs.pop(),
            _ => Some(merge_platform_catalogs(catalogs)),
        })
    }

    /// Extensions available for a runtime core version, or for the default
    /// platform's runtime version when none is given.
    pub async fn resolve_extension_catalog(
        &self,
        runtime_core_version: Option<&str>,
    ) -> Result<ExtensionCatalog> {
        if self.registries.is_empty() {
            return Err(Error::NoRegistries);
        }

        let mut visited = VersionIndex::new();
        let (seed, aligned) = match runtime_core_version {
            Some(version) => (version.to_string(), None),
            None if self.registries.len() == 1 => {
                let registry = &self.registries[0];
                let scan = registry
                    .resolve_platform_catalog(None)
                    .await?
                    .and_then(PlatformScan::new)
                    .ok_or_else(|| Error::EmptyPlatformCatalog {
                        registry: registry.id().to_string(),
                    })?;
                let authoritative = match &scan.common_version {
                    Some(common) => registries_for_runtime_version(&self.registries, common)?,
                    None => Vec::new(),
                };
                match scan.common_version {
                    Some(common) if authoritative.len() == 1 => {
                        // All platforms share a runtime version, so the
                        // walk would only revisit this registry.
                        tracing::debug!(
                            registry = registry.id(),
                            runtime_core_version = %common,
                            "All platforms are aligned on one runtime version"
                        );
                        visited.insert(common, authoritative);
                        let catalogs = try_join_all(
                            scan.platforms
                                .iter()
                                .map(|p| registry.resolve_platform_extensions(&p.bom)),
                        )
                        .await?;
                        (scan.seed_version, Some(catalogs))
                    }
                    _ => (scan.seed_version, None),
                }
            }
            None => {
                let default = self.registries[0].resolve_default_platform().await?;
                (default.runtime_core_version, None)
            }
        };

        let catalogs = match aligned {
            Some(catalogs) => catalogs,
            None => {
                tracing::debug!(runtime_core_version = %seed, "Collecting platform extensions");
                VersionGraphWalker::new(&self.registries)
                    .walk(&seed, &mut visited)
                    .await?
            }
        };

        let empty = || ExtensionCatalog::new(seed.clone(), seed.clone());
        self.append_non_platform_extensions(&visited, catalogs, empty)
            .await
    }

    /// Extensions available for explicitly selected platform BOMs.
    ///
    /// A platform no registry can resolve is skipped with a warning. An empty
    /// selection behaves like [`resolve_extension_catalog`] without a version.
    ///
    /// [`resolve_extension_catalog`]: CatalogResolver::resolve_extension_catalog
    pub async fn resolve_extension_catalog_for_platforms(
        &self,
        platforms: &[ArtifactCoords],
    ) -> Result<ExtensionCatalog> {
        if platforms.is_empty() {
            return self.resolve_extension_catalog(None).await;
        }

        let candidates = platforms
            .iter()
            .map(|bom| registries_for_platform(&self.registries, bom).map(|r| (bom, r)))
            .collect::<Result<Vec<_>>>()?;

        let resolved = join_all(
            candidates
                .iter()
                .map(|(bom, registries)| resolve_platform_extensions(bom, registries)),
        )
        .await;

        let mut visited = VersionIndex::new();
        let mut catalogs = Vec::with_capacity(resolved.len());
        for catalog in resolved.into_iter().flatten() {
            if visited.is_empty() {
                let version = &catalog.runtime_core_version;
                visited.insert(
                    version.clone(),
                    registries_for_runtime_version(&self.registries, version)?,
                );
            }
            if let Some(upstream) = &catalog.upstream_runtime_core_version
                && !visited.contains(upstream)
            {
                visited.insert(
                    upstream.clone(),
                    registries_for_runtime_version(&self.registries, upstream)?,
                );
            }
            catalogs.push(catalog);
        }

        let first = &platforms[0];
        let empty = || ExtensionCatalog::new(first.to_string(), first.version.clone());
        self.append_non_platform_extensions(&visited, catalogs, empty)
            .await
    }

    /// Add every visited version's non-platform extensions, then merge.
    ///
    /// Nothing collected is not an error: `empty` provides the result.
    async fn append_non_platform_extensions(
        &self,
        visited: &VersionIndex,
        mut catalogs: Vec<ExtensionCatalog>,
        empty: impl FnOnce() -> ExtensionCatalog,
    ) -> Result<ExtensionCatalog> {
        let queries = visited.iter().flat_map(|(version, registries)| {
            registries
                .iter()
                .map(move |registry| registry.resolve_non_platform_extensions(version))
        });
        let non_platform = try_join_all(queries).await?;
        catalogs.extend(non_platform.into_iter().flatten());
        if catalogs.is_empty() {
            tracing::debug!(versions = visited.len(), "No extension catalogs were collected");
            return Ok(empty());
        }

        tracing::debug!(
            catalogs = catalogs.len(),
            versions = visited.len(),
            "Merging extension catalogs"
        );
        Ok(self.merger.merge(catalogs)?)
    }
}

/// Try each registry in order until one resolves the platform.
///
/// Emits one warning when any registry failed: naming the registry that
/// recovered, or every registry tried when none did.
async fn resolve_platform_extensions(
    bom: &ArtifactCoords,
    registries: &[Arc<dyn RegistryEndpoint>],
) -> Option<ExtensionCatalog> {
    if registries.is_empty() {
        tracing::debug!(%bom, "None of the configured registries recognizes platform");
        return None;
    }

    let mut failed: Vec<&str> = Vec::new();
    for registry in registries {
        match registry.resolve_platform_extensions(bom).await {
            Ok(catalog) => {
                if !failed.is_empty() {
                    tracing::warn!(
                        "Resolved platform {} using registry {} after failures in: {}",
                        bom,
                        registry.id(),
                        failed.join(", ")
                    );
                }
                return Some(catalog);
            }
            Err(e) => {
                tracing::debug!(
                    registry = registry.id(),
                    %bom,
                    error = %e,
                    "Platform resolution failed"
                );
                failed.push(registry.id());
            }
        }
    }

    tracing::warn!(
        "Failed to resolve platform {} using the following registries: {}",
        bom,
        failed.join(", ")
    );
    None
}

impl std::fmt::Debug for CatalogResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogResolver")
            .field("registries", &self.registry_ids())
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
