//! Construction of a [`CatalogResolver`].

use std::sync::Arc;

use registry_catalog::{CatalogMerger, DefaultCatalogMerger};
use registry_client::{DefaultRegistryClientFactory, RegistryClientFactory, RegistryEndpoint};
use registry_config::{RegistriesConfig, RegistriesConfigLocator};

use crate::error::Result;
use crate::resolver::CatalogResolver;

/// Builder for [`CatalogResolver`].
///
/// Without an explicit configuration or endpoints, the user configuration
/// is located with [`RegistriesConfigLocator`].
#[derive(Default)]
pub struct CatalogResolverBuilder {
    config: Option<RegistriesConfig>,
    factory: Option<Box<dyn RegistryClientFactory>>,
    merger: Option<Arc<dyn CatalogMerger>>,
    endpoints: Vec<Arc<dyn RegistryEndpoint>>,
}

impl CatalogResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RegistriesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Factory building endpoints for configured registries.
    pub fn factory(mut self, factory: impl RegistryClientFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn merger(mut self, merger: impl CatalogMerger + 'static) -> Self {
        self.merger = Some(Arc::new(merger));
        self
    }

    /// Add a ready-made endpoint after the configured registries.
    pub fn endpoint(mut self, endpoint: Arc<dyn RegistryEndpoint>) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Build the resolver.
    ///
    /// Disabled registries are skipped. A registry whose client cannot be
    /// constructed is skipped with a warning. Having no usable registry is
    /// not an error here.
    pub fn build(self) -> Result<CatalogResolver> {
        let config = match self.config {
            Some(config) => config,
            None if self.endpoints.is_empty() => RegistriesConfigLocator::new().resolve()?,
            None => RegistriesConfig::default(),
        };
        let factory = self
            .factory
            .unwrap_or_else(|| Box::new(DefaultRegistryClientFactory));

        let mut registries = Vec::with_capacity(config.registries.len() + self.endpoints.len());
        for registry in config.registries.iter().filter(|r| !r.enabled) {
            tracing::debug!(registry = %registry.id, "Skipping disabled registry");
        }
        for registry in config.enabled() {
            match factory.build(registry) {
                Ok(endpoint) => registries.push(endpoint),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        registries.extend(self.endpoints);

        tracing::debug!(registries = registries.len(), "Built catalog resolver");
        Ok(CatalogResolver {
            registries,
            merger: self
                .merger
                .unwrap_or_else(|| Arc::new(DefaultCatalogMerger)),
            debug: config.debug,
        })
    }
}
