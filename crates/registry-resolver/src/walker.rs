//! Breadth-first traversal of upstream runtime version links.
//!
//! Nodes are runtime core versions, edges are "a platform built on version A
//! declares upstream version B". The graph is discovered lazily while
//! platform catalogs are resolved. Every version is recorded in the
//! [`VersionIndex`] before its platforms are inspected, so cycles and
//! self-references terminate.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use registry_catalog::{ArtifactCoords, ExtensionCatalog};
use registry_client::RegistryEndpoint;

use crate::error::Result;
use crate::filter::registries_for_runtime_version;
use crate::version_index::VersionIndex;

/// Collects the platform extension catalogs reachable from a runtime core
/// version.
pub struct VersionGraphWalker<'a> {
    registries: &'a [Arc<dyn RegistryEndpoint>],
}

impl<'a> VersionGraphWalker<'a> {
    pub fn new(registries: &'a [Arc<dyn RegistryEndpoint>]) -> Self {
        Self { registries }
    }

    /// Walk from `start`, skipping versions already in `visited`.
    ///
    /// Queries within one level of the walk run concurrently. Results are
    /// ordered by version discovery, then registry order, then the order of
    /// each registry's platform list.
    pub async fn walk(
        &self,
        start: &str,
        visited: &mut VersionIndex,
    ) -> Result<Vec<ExtensionCatalog>> {
        let mut collected = Vec::new();
        let mut frontier = vec![start.to_string()];

        while !frontier.is_empty() {
            let mut level: Vec<(String, Arc<dyn RegistryEndpoint>)> = Vec::new();
            for version in frontier {
                if visited.contains(&version) {
                    continue;
                }
                let registries = registries_for_runtime_version(self.registries, &version)?;
                for registry in &registries {
                    level.push((version.clone(), registry.clone()));
                }
                visited.insert(version, registries);
            }

            let platform_catalogs = try_join_all(level.iter().map(|(version, registry)| {
                registry.resolve_platform_catalog(Some(version.as_str()))
            }))
            .await?;

            let mut next = Vec::new();
            let mut queued = HashSet::new();
            let mut requests: Vec<(&Arc<dyn RegistryEndpoint>, ArtifactCoords)> = Vec::new();
            for ((version, registry), catalog) in level.iter().zip(platform_catalogs) {
                let Some(catalog) = catalog.filter(|c| !c.is_empty()) else {
                    tracing::debug!(
                        registry = registry.id(),
                        runtime_core_version = %version,
                        "Registry has no platforms for runtime version"
                    );
                    continue;
                };
                for platform in catalog.platforms {
                    if let Some(upstream) = platform.upstream_runtime_core_version
                        && !visited.contains(&upstream)
                        && queued.insert(upstream.clone())
                    {
                        next.push(upstream);
                    }
                    requests.push((registry, platform.bom));
                }
            }

            let catalogs = try_join_all(
                requests
                    .iter()
                    .map(|(registry, bom)| registry.resolve_platform_extensions(bom)),
            )
            .await?;
            collected.extend(catalogs);

            if !next.is_empty() {
                tracing::debug!(upstream = ?next, "Following upstream runtime versions");
            }
            frontier = next;
        }

        Ok(collected)
    }
}
