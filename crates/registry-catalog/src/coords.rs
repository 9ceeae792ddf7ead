//! Artifact coordinates and keys.
//!
//! Coordinates use the colon separated form
//! `group:artifact[:classifier[:type]]:version`:
//!
//! ```
//! use registry_catalog::ArtifactCoords;
//!
//! let bom: ArtifactCoords = "io.acme.platform:acme-bom::pom:3.2.0".parse().unwrap();
//! assert_eq!(bom.group_id, "io.acme.platform");
//! assert_eq!(bom.kind, "pom");
//! assert_eq!(bom.to_string(), "io.acme.platform:acme-bom::pom:3.2.0");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Type assumed when a coordinate string does not name one.
pub const DEFAULT_TYPE: &str = "jar";

/// Type of a platform bill of materials.
pub const POM_TYPE: &str = "pom";

/// Identity of an artifact without its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: String,
    pub kind: String,
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.classifier, self.kind
        )
    }
}

/// Coordinates of one release of a distributable artifact.
///
/// Two coordinates with equal [`ArtifactKey`]s and different versions are
/// different releases of the same artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactCoords {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: String,
    /// Packaging type (`jar`, `pom`, ...).
    pub kind: String,
    pub version: String,
}

impl ArtifactCoords {
    /// An empty `kind` means [`DEFAULT_TYPE`].
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        kind: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let mut kind = kind.into();
        if kind.is_empty() {
            kind = DEFAULT_TYPE.to_string();
        }
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: classifier.into(),
            kind,
            version: version.into(),
        }
    }

    /// Coordinates of a `jar` artifact without a classifier.
    pub fn jar(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::new(group_id, artifact_id, "", DEFAULT_TYPE, version)
    }

    /// Coordinates of a `pom` artifact, the shape of a platform BOM.
    pub fn pom(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::new(group_id, artifact_id, "", POM_TYPE, version)
    }

    /// The version-less identity used for deduplication.
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            classifier: self.classifier.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Display for ArtifactCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.classifier, self.kind, self.version
        )
    }
}

impl FromStr for ArtifactCoords {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidCoords {
            coords: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        let (group_id, artifact_id, classifier, kind, version) = match parts.as_slice() {
            [g, a, v] => (*g, *a, "", DEFAULT_TYPE, *v),
            [g, a, t, v] => (*g, *a, "", *t, *v),
            [g, a, c, t, v] => (*g, *a, *c, *t, *v),
            _ => return Err(invalid("expected group:artifact[:classifier[:type]]:version")),
        };

        if group_id.is_empty() {
            return Err(invalid("group id is empty"));
        }
        if artifact_id.is_empty() {
            return Err(invalid("artifact id is empty"));
        }
        if version.is_empty() {
            return Err(invalid("version is empty"));
        }

        Ok(Self::new(group_id, artifact_id, classifier, kind, version))
    }
}

impl TryFrom<String> for ArtifactCoords {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ArtifactCoords> for String {
    fn from(coords: ArtifactCoords) -> Self {
        coords.to_string()
    }
}
