//! Registry endpoints for the platform registry resolver.
//!
//! A [`RegistryEndpoint`] is one enabled registry as seen by the resolver: it
//! classifies platform and runtime version queries and resolves catalogs.
//! Each registry transport provides its own implementation; this crate ships
//! [`StaticRegistry`], backed by a registry document on disk, and the
//! [`RegistryClientFactory`] that builds endpoints from configuration.

pub mod endpoint;
pub mod error;
pub mod factory;
pub mod policy;
pub mod static_registry;

pub use endpoint::RegistryEndpoint;
pub use error::{Error, Result};
pub use factory::{DefaultRegistryClientFactory, RegistryClientFactory};
pub use policy::RegistryPolicy;
pub use static_registry::{RegistryDocument, StaticRegistry};
