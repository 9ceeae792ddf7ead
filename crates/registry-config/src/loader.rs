//! Format-agnostic loading of registries configuration.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::RegistriesConfig;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
            ConfigFormat::Yaml => "YAML",
        }
    }

    /// Deserialize `content`, attributing failures to `path`.
    pub fn parse<T: serde::de::DeserializeOwned>(&self, content: &str, path: &Path) -> Result<T> {
        let parsed = match self {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        })
    }
}

/// Parse and validate registries configuration from a string.
pub fn parse_config(content: &str, format: ConfigFormat, path: &Path) -> Result<RegistriesConfig> {
    let config: RegistriesConfig = format.parse(content, path)?;
    config.validate()?;
    Ok(config)
}

/// Load registries configuration from a file.
///
/// Relative registry catalog paths are resolved against the directory
/// containing the file.
pub fn load_config(path: &Path) -> Result<RegistriesConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = parse_config(&content, format, path)?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    tracing::debug!(
        path = %path.display(),
        registries = config.registries.len(),
        "Loaded registries configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[rstest]
    #[case("config.toml", ConfigFormat::Toml)]
    #[case("config.JSON", ConfigFormat::Json)]
    #[case("config.yaml", ConfigFormat::Yaml)]
    #[case("config.yml", ConfigFormat::Yaml)]
    fn test_format_detection(#[case] file: &str, #[case] expected: ConfigFormat) {
        assert_eq!(ConfigFormat::from_path(Path::new(file)).unwrap(), expected);
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("config.ini")),
            Err(Error::UnsupportedFormat { extension }) if extension == "ini"
        ));
    }

    #[test]
    fn test_load_toml_resolves_catalog_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
debug = true

[[registries]]
id = "registry.acme.io"
catalog = "acme.json"

[registries.runtime-versions]
recognized = '^3\..*'
exclusive-provider = true

[[registries]]
id = "community.example.org"
enabled = false
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.debug);
        assert_eq!(config.registries.len(), 2);

        let acme = &config.registries[0];
        assert_eq!(acme.catalog, Some(temp.path().join("acme.json")));
        assert_eq!(acme.runtime_versions.recognized.as_deref(), Some(r"^3\..*"));
        assert!(acme.runtime_versions.exclusive_provider);
        assert!(!config.registries[1].enabled);
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
registries:
  - id: registry.acme.io
    platforms:
      recognized-group-ids: ["io.acme.platform"]
      exclusive-provider: true
  - id: community.example.org
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let ids: Vec<&str> = config.registries.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["registry.acme.io", "community.example.org"]);
        assert_eq!(
            config.registries[0].platforms.recognized_group_ids,
            vec!["io.acme.platform".to_string()]
        );
    }

    #[test]
    fn test_parse_error_names_path() {
        let path = PathBuf::from("broken.json");
        let err = parse_config("{ not json", ConfigFormat::Json, &path).unwrap_err();
        assert!(matches!(err, Error::Parse { ref format, .. } if format == "JSON"));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let content = r#"{ "registries": [ { "id": "a" }, { "id": "a" } ] }"#;
        let err = parse_config(content, ConfigFormat::Json, Path::new("c.json")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistry { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
