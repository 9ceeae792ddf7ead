//! Error types for registry-client

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Registry {registry} does not provide platform {bom}")]
    PlatformNotFound { registry: String, bom: String },

    #[error("Registry {registry} does not recommend a default platform")]
    NoDefaultPlatform { registry: String },

    #[error("Registry {registry} failed to resolve catalog: {message}")]
    Resolution { registry: String, message: String },

    #[error("Failed to construct client for registry {registry}: {message}")]
    Construction { registry: String, message: String },

    #[error("Invalid runtime version pattern '{pattern}' for registry {registry}: {source}")]
    InvalidPattern {
        registry: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("Failed to load registry document: {0}")]
    Document(#[from] registry_config::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_not_found_display() {
        let err = Error::PlatformNotFound {
            registry: "registry.acme.io".to_string(),
            bom: "io.acme:acme-bom::pom:1.0".to_string(),
        };
        assert!(err.to_string().contains("registry.acme.io"));
        assert!(err.to_string().contains("acme-bom"));
    }
}
