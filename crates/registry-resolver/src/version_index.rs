//! Runtime core versions visited during one resolution.

use std::collections::HashMap;
use std::sync::Arc;

use registry_client::RegistryEndpoint;

/// Insertion-ordered map from runtime core version to the registries
/// authoritative for it.
///
/// A version present in the index has been visited and is never processed
/// again.
#[derive(Default, Clone)]
pub struct VersionIndex {
    positions: HashMap<String, usize>,
    entries: Vec<(String, Vec<Arc<dyn RegistryEndpoint>>)>,
}

impl VersionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the registries for a version. Returns `false`, leaving the
    /// index untouched, when the version was already recorded.
    pub fn insert(
        &mut self,
        runtime_core_version: impl Into<String>,
        registries: Vec<Arc<dyn RegistryEndpoint>>,
    ) -> bool {
        let version = runtime_core_version.into();
        if self.positions.contains_key(&version) {
            return false;
        }
        self.positions.insert(version.clone(), self.entries.len());
        self.entries.push((version, registries));
        true
    }

    pub fn contains(&self, runtime_core_version: &str) -> bool {
        self.positions.contains_key(runtime_core_version)
    }

    pub fn get(&self, runtime_core_version: &str) -> Option<&[Arc<dyn RegistryEndpoint>]> {
        self.positions
            .get(runtime_core_version)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Versions in the order they were visited.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(v, _)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<dyn RegistryEndpoint>])> {
        self.entries.iter().map(|(v, r)| (v.as_str(), r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for VersionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(v, r)| (v, r.iter().map(|e| e.id()).collect::<Vec<_>>())),
            )
            .finish()
    }
}
