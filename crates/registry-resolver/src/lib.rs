//! Catalog resolution across configured registries.
//!
//! Given the ordered registries of a [`RegistriesConfig`], the
//! [`CatalogResolver`] answers which platforms are available and which
//! extensions are compatible with a runtime core version, merging what every
//! authoritative registry contributes:
//!
//! - [`filter`] arbitrates which registries are authoritative for a query,
//!   rejecting conflicting exclusivity claims
//! - [`walker`] follows upstream runtime version links between platform
//!   releases until no new version is discovered
//! - [`aggregate`] merges platform catalogs from several registries
//!
//! [`RegistriesConfig`]: registry_config::RegistriesConfig

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod filter;
pub mod logging;
pub mod resolver;
pub mod version_index;
pub mod walker;

pub use aggregate::merge_platform_catalogs;
pub use builder::CatalogResolverBuilder;
pub use error::{Error, Result};
pub use filter::{ExclusiveConflict, filter_registries};
pub use resolver::CatalogResolver;
pub use version_index::VersionIndex;
pub use walker::VersionGraphWalker;
