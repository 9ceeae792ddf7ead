//! Registry configuration for the platform registry resolver.
//!
//! This crate provides the configuration model listing the registries a
//! resolver consults, format-agnostic loading of configuration files and a
//! locator for the user's default configuration.

pub mod error;
pub mod loader;
pub mod locator;
pub mod model;

pub use error::{Error, Result};
pub use loader::{ConfigFormat, load_config, parse_config};
pub use locator::{CONFIG_ENV_VAR, RegistriesConfigLocator};
pub use model::{
    NonPlatformExtensionsConfig, PlatformsConfig, RegistriesConfig, RegistryConfig,
    RuntimeVersionsConfig, STATIC_KIND,
};
