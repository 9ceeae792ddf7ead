//! Extension catalogs.
//!
//! An [`ExtensionCatalog`] is what a registry returns for one platform BOM or
//! for the non-platform extensions of one runtime core version. Beyond the
//! two version fields, its contents only matter to a [`CatalogMerger`].
//!
//! [`CatalogMerger`]: crate::merge::CatalogMerger

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coords::ArtifactCoords;

/// A single installable extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Extension {
    pub artifact: ArtifactCoords,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of the catalogs this extension was found in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Extension {
    pub fn new(artifact: ArtifactCoords, name: impl Into<String>) -> Self {
        Self {
            artifact,
            name: name.into(),
            description: None,
            origins: Vec::new(),
            metadata: Map::new(),
        }
    }
}

/// Grouping used by tooling to present extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Extensions available for one platform or one runtime core version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionCatalog {
    pub id: String,
    pub runtime_core_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_runtime_core_version: Option<String>,
    /// The platform BOM this catalog describes, when it is a platform catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom: Option<ArtifactCoords>,
    #[serde(default)]
    pub platform: bool,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl ExtensionCatalog {
    /// An empty catalog of extensions that belong to no platform.
    pub fn new(id: impl Into<String>, runtime_core_version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            runtime_core_version: runtime_core_version.into(),
            upstream_runtime_core_version: None,
            bom: None,
            platform: false,
            extensions: Vec::new(),
            categories: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// An empty catalog for a platform BOM. The BOM string is used as the id.
    pub fn for_platform(bom: ArtifactCoords, runtime_core_version: impl Into<String>) -> Self {
        let mut catalog = Self::new(bom.to_string(), runtime_core_version);
        catalog.bom = Some(bom);
        catalog.platform = true;
        catalog
    }

    pub fn with_upstream(mut self, version: impl Into<String>) -> Self {
        self.upstream_runtime_core_version = Some(version.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }
}
