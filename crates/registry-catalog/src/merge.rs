//! Assembly of partial extension catalogs into one.

use std::collections::{HashMap, HashSet};

use crate::coords::ArtifactKey;
use crate::error::{Error, Result};
use crate::extension::{Extension, ExtensionCatalog};

/// Combines the partial catalogs gathered from every contributing registry.
pub trait CatalogMerger: Send + Sync {
    fn merge(&self, catalogs: Vec<ExtensionCatalog>) -> Result<ExtensionCatalog>;
}

/// First-wins merge of extension catalogs.
///
/// - runtime core version comes from the first catalog, the upstream version
///   from the first catalog that declares one
/// - extensions are deduplicated by artifact key; later duplicates only add
///   their catalog id to the surviving extension's origins
/// - categories are deduplicated by id and metadata keys by name
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalogMerger;

impl CatalogMerger for DefaultCatalogMerger {
    fn merge(&self, catalogs: Vec<ExtensionCatalog>) -> Result<ExtensionCatalog> {
        let mut catalogs = catalogs.into_iter();
        let Some(first) = catalogs.next() else {
            return Err(Error::EmptyMerge);
        };
        let rest: Vec<ExtensionCatalog> = catalogs.collect();
        if rest.is_empty() {
            return Ok(first);
        }

        let mut merged =
            ExtensionCatalog::new(first.id.clone(), first.runtime_core_version.clone());
        let mut ids = Vec::with_capacity(rest.len() + 1);
        let mut extension_index: HashMap<ArtifactKey, usize> = HashMap::new();
        let mut category_ids: HashSet<String> = HashSet::new();

        for catalog in std::iter::once(first).chain(rest) {
            ids.push(catalog.id.clone());

            if merged.upstream_runtime_core_version.is_none() {
                merged.upstream_runtime_core_version = catalog.upstream_runtime_core_version;
            }
            if catalog.platform && !merged.platform {
                merged.platform = true;
                merged.bom = catalog.bom;
            }

            for extension in catalog.extensions {
                add_extension(
                    &mut merged.extensions,
                    &mut extension_index,
                    extension,
                    &catalog.id,
                );
            }

            for category in catalog.categories {
                if category_ids.insert(category.id.clone()) {
                    merged.categories.push(category);
                }
            }

            for (key, value) in catalog.metadata {
                merged.metadata.entry(key).or_insert(value);
            }
        }

        merged.id = ids.join("+");
        tracing::debug!(
            catalogs = ids.len(),
            extensions = merged.extensions.len(),
            "Merged extension catalogs"
        );
        Ok(merged)
    }
}

fn add_extension(
    extensions: &mut Vec<Extension>,
    index: &mut HashMap<ArtifactKey, usize>,
    mut extension: Extension,
    origin: &str,
) {
    let key = extension.artifact.key();
    match index.get(&key) {
        Some(&position) => {
            let existing = &mut extensions[position];
            if !existing.origins.iter().any(|o| o == origin) {
                existing.origins.push(origin.to_string());
            }
        }
        None => {
            if extension.origins.is_empty() {
                extension.origins.push(origin.to_string());
            }
            index.insert(key, extensions.len());
            extensions.push(extension);
        }
    }
}
