//! Catalog model for the platform registry resolver.
//!
//! This crate defines artifact coordinates, platform catalogs, extension
//! catalogs and the classification a registry gives a query. It also
//! provides the [`CatalogMerger`] seam used to assemble partial extension
//! catalogs into a single result.

pub mod classification;
pub mod coords;
pub mod error;
pub mod extension;
pub mod merge;
pub mod platform;

pub use classification::Classification;
pub use coords::{ArtifactCoords, ArtifactKey};
pub use error::{Error, Result};
pub use extension::{Category, Extension, ExtensionCatalog};
pub use merge::{CatalogMerger, DefaultCatalogMerger};
pub use platform::{Platform, PlatformCatalog};
