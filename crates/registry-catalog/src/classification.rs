//! How a registry classifies a platform or runtime version query.

use serde::{Deserialize, Serialize};

/// Answer a registry gives when asked whether it knows a platform BOM or a
/// runtime core version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// The registry knows nothing about the query.
    #[default]
    NotRecognized,
    /// The registry can contribute to the query.
    Recognized,
    /// The registry claims to be the only source for the query.
    ExclusiveProvider,
}

impl Classification {
    /// Whether the registry should be consulted at all.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Classification::NotRecognized)
    }
}
