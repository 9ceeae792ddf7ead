//! Construction of registry endpoints from configuration.

use std::sync::Arc;

use registry_config::{RegistryConfig, STATIC_KIND};

use crate::endpoint::RegistryEndpoint;
use crate::error::{Error, Result};
use crate::static_registry::StaticRegistry;

/// Builds the endpoint for one configured registry.
pub trait RegistryClientFactory: Send + Sync {
    fn build(&self, config: &RegistryConfig) -> Result<Arc<dyn RegistryEndpoint>>;
}

/// Factory for the registry kinds shipped with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRegistryClientFactory;

impl RegistryClientFactory for DefaultRegistryClientFactory {
    fn build(&self, config: &RegistryConfig) -> Result<Arc<dyn RegistryEndpoint>> {
        match config.kind.as_str() {
            STATIC_KIND => Ok(Arc::new(StaticRegistry::from_config(config)?)),
            other => Err(Error::Construction {
                registry: config.id.clone(),
                message: format!("unsupported registry kind '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_registry::RegistryDocument;
    use tempfile::TempDir;

    #[test]
    fn test_builds_static_registry() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.yaml");
        let content = serde_json::to_string(&RegistryDocument::default()).unwrap();
        std::fs::write(&path, content).unwrap();

        let config = RegistryConfig::new("registry.acme.io").with_catalog(&path);
        let endpoint = DefaultRegistryClientFactory.build(&config).unwrap();
        assert_eq!(endpoint.id(), "registry.acme.io");
    }

    #[test]
    fn test_unknown_kind_fails_construction() {
        let mut config = RegistryConfig::new("registry.acme.io");
        config.kind = "carrier-pigeon".to_string();
        let err = match DefaultRegistryClientFactory.build(&config) {
            Ok(_) => panic!("expected construction failure"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::Construction { .. }));
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
