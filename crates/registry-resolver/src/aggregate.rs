//! Merging of platform catalogs from several registries.

use std::collections::HashSet;

use registry_catalog::PlatformCatalog;

/// Merge platform catalogs given in registry order.
///
/// The default platform of the first catalog is kept. Platforms are appended
/// in input order and a BOM key that was already seen is dropped.
pub fn merge_platform_catalogs(catalogs: Vec<PlatformCatalog>) -> PlatformCatalog {
    let mut catalogs = catalogs.into_iter();
    let Some(first) = catalogs.next() else {
        return PlatformCatalog::default();
    };

    let mut merged = PlatformCatalog::new(Vec::new(), first.default_platform.clone());
    let mut seen = HashSet::new();
    for catalog in std::iter::once(first).chain(catalogs) {
        for platform in catalog.platforms {
            if seen.insert(platform.bom.key()) {
                merged.platforms.push(platform);
            }
        }
    }
    merged
}
