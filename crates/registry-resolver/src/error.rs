//! Error types for registry-resolver

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No registries configured")]
    NoRegistries,

    #[error("Registry {registry} does not provide any platform")]
    EmptyPlatformCatalog { registry: String },

    /// Two or more registries claim to be the only source for the same
    /// platform or runtime version.
    #[error(
        "The following registries were configured as exclusive providers of {subject}: {}",
        .registries.join(", ")
    )]
    ExclusiveProviderConflict {
        subject: String,
        registries: Vec<String>,
    },

    #[error(transparent)]
    Endpoint(#[from] registry_client::Error),

    #[error("Failed to merge extension catalogs: {0}")]
    Merge(#[from] registry_catalog::Error),

    #[error("Failed to load registries configuration: {0}")]
    Config(#[from] registry_config::Error),
}
