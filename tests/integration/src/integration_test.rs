//! End-to-end resolution over static registries.
//!
//! Exercises the complete flow: configuration file -> registry documents ->
//! resolver -> merged catalogs.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use registry_catalog::ArtifactCoords;
use registry_config::{RegistriesConfigLocator, load_config};
use registry_resolver::CatalogResolver;
use registry_test_utils::CapturedWarnings;
use tempfile::TempDir;

const ACME_DOCUMENT: &str = r#"{
  "platforms": {
    "platforms": [
      {
        "bom": "io.acme.platform:acme-bom::pom:3.2.0",
        "runtime-core-version": "3.2.0",
        "upstream-runtime-core-version": "3.1.0"
      }
    ],
    "default-platform": "io.acme.platform:acme-bom::pom:3.2.0"
  },
  "platform-extensions": [
    {
      "id": "acme-3.2.0",
      "runtime-core-version": "3.2.0",
      "upstream-runtime-core-version": "3.1.0",
      "platform": true,
      "bom": "io.acme.platform:acme-bom::pom:3.2.0",
      "extensions": [
        { "artifact": "io.acme:rest:3.2.0", "name": "REST" }
      ],
      "categories": [
        { "id": "web", "name": "Web" }
      ]
    }
  ],
  "non-platform-extensions": [
    {
      "id": "acme-extras-3.2.0",
      "runtime-core-version": "3.2.0",
      "extensions": [
        { "artifact": "io.acme.extras:qute-web:1.0.0", "name": "Qute Web" }
      ]
    }
  ]
}"#;

const LEGACY_DOCUMENT: &str = r#"
platforms:
  platforms:
    - bom: "io.legacy.platform:legacy-bom::pom:3.1.0"
      runtime-core-version: "3.1.0"
platform-extensions:
  - id: legacy-3.1.0
    runtime-core-version: "3.1.0"
    platform: true
    bom: "io.legacy.platform:legacy-bom::pom:3.1.0"
    extensions:
      - artifact: "io.acme:rest:3.1.0"
        name: REST
      - artifact: "io.legacy:rest-classic:3.1.0"
        name: REST Classic
    categories:
      - id: web
        name: Web (legacy)
      - id: compat
        name: Compatibility
non-platform-extensions:
  - id: legacy-extras-3.1.0
    runtime-core-version: "3.1.0"
    extensions:
      - artifact: "io.legacy.extras:soap:1.0.0"
        name: SOAP
"#;

const CONFIG: &str = r#"
[[registries]]
id = "registry.acme.io"
catalog = "acme.json"

[registries.runtime-versions]
recognized = '3\.2\..*'

[registries.platforms]
recognized-group-ids = ["io.acme.platform"]

[[registries]]
id = "registry.legacy.io"
catalog = "registries/legacy.yaml"

[registries.runtime-versions]
recognized = '3\.1\..*'
exclusive-provider = true

[registries.platforms]
recognized-group-ids = ["io.legacy.platform"]

[[registries]]
id = "registry.retired.io"
enabled = false
catalog = "does-not-exist.json"
"#;

/// Write the configuration and both registry documents under `root`.
fn setup_registries(root: &Path) -> std::path::PathBuf {
    fs::write(root.join("acme.json"), ACME_DOCUMENT).unwrap();
    fs::create_dir(root.join("registries")).unwrap();
    fs::write(root.join("registries/legacy.yaml"), LEGACY_DOCUMENT).unwrap();
    let config = root.join("config.toml");
    fs::write(&config, CONFIG).unwrap();
    config
}

fn resolver(root: &Path) -> CatalogResolver {
    let config = load_config(&setup_registries(root)).unwrap();
    CatalogResolver::builder().config(config).build().unwrap()
}

fn names(catalog: &registry_catalog::ExtensionCatalog) -> Vec<&str> {
    catalog.extensions.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn test_load_configuration_and_build() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());

    assert_eq!(
        resolver.registry_ids(),
        vec!["registry.acme.io", "registry.legacy.io"]
    );
    assert!(!resolver.is_debug());
}

#[tokio::test]
async fn test_default_resolution_follows_upstream_into_exclusive_registry() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());

    let catalog = resolver.resolve_extension_catalog(None).await.unwrap();

    assert_eq!(catalog.runtime_core_version, "3.2.0");
    assert_eq!(catalog.upstream_runtime_core_version.as_deref(), Some("3.1.0"));
    assert_eq!(
        catalog.bom,
        Some(ArtifactCoords::pom("io.acme.platform", "acme-bom", "3.2.0"))
    );
    assert_eq!(names(&catalog), vec!["REST", "REST Classic", "Qute Web", "SOAP"]);
    assert_eq!(catalog.extensions[0].origins, vec!["acme-3.2.0", "legacy-3.1.0"]);

    let categories: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(categories, vec!["Web", "Compatibility"]);
    assert_eq!(
        catalog.id,
        "acme-3.2.0+legacy-3.1.0+acme-extras-3.2.0+legacy-extras-3.1.0"
    );
}

#[tokio::test]
async fn test_explicit_version_outside_every_registry() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());

    // Nobody recognizes 2.x, so the catalog is empty.
    let catalog = resolver
        .resolve_extension_catalog(Some("2.0.0"))
        .await
        .unwrap();
    assert_eq!(catalog.runtime_core_version, "2.0.0");
    assert!(catalog.extensions.is_empty());
    assert!(catalog.bom.is_none());
}

#[tokio::test]
async fn test_selected_legacy_platform() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());
    let (warnings, _guard) = CapturedWarnings::install();

    let legacy = ArtifactCoords::pom("io.legacy.platform", "legacy-bom", "3.1.0");
    let unknown = ArtifactCoords::pom("io.unknown", "unknown-bom", "1.0.0");
    let catalog = resolver
        .resolve_extension_catalog_for_platforms(&[unknown, legacy])
        .await
        .unwrap();

    assert_eq!(names(&catalog), vec!["REST", "REST Classic", "SOAP"]);
    // No registry recognizes the unknown BOM, so it is skipped silently.
    assert_eq!(warnings.count(), 0);
}

#[tokio::test]
async fn test_only_unknown_platform_selected() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());

    let unknown = ArtifactCoords::pom("io.unknown", "unknown-bom", "1.0.0");
    let catalog = resolver
        .resolve_extension_catalog_for_platforms(&[unknown])
        .await
        .unwrap();
    assert!(catalog.extensions.is_empty());
    assert_eq!(catalog.runtime_core_version, "1.0.0");
}

#[tokio::test]
async fn test_platform_catalog_across_registries() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(temp.path());

    let all = resolver.resolve_platform_catalog(None).await.unwrap().unwrap();
    let boms: Vec<String> = all.platforms.iter().map(|p| p.bom.to_string()).collect();
    assert_eq!(
        boms,
        vec![
            "io.acme.platform:acme-bom::pom:3.2.0",
            "io.legacy.platform:legacy-bom::pom:3.1.0",
        ]
    );
    assert_eq!(
        all.default_platform,
        Some(ArtifactCoords::pom("io.acme.platform", "acme-bom", "3.2.0"))
    );

    let legacy_only = resolver
        .resolve_platform_catalog(Some("3.1.0"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(legacy_only.platforms.len(), 1);
    assert_eq!(
        legacy_only.default_platform,
        Some(ArtifactCoords::pom("io.legacy.platform", "legacy-bom", "3.1.0"))
    );
}

#[test]
fn test_locator_finds_config_in_home() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".platform-registry");
    fs::create_dir(&dir).unwrap();
    setup_registries(&dir);

    let locator = RegistriesConfigLocator::new()
        .with_explicit(None)
        .with_home(Some(home.path().to_path_buf()));
    assert_eq!(locator.locate(), Some(dir.join("config.toml")));

    let config = locator.resolve().unwrap();
    let resolver = CatalogResolver::builder().config(config).build().unwrap();
    assert_eq!(resolver.registry_ids().len(), 2);
}

#[test]
fn test_missing_configuration_yields_no_registries() {
    let home = TempDir::new().unwrap();
    let config = RegistriesConfigLocator::new()
        .with_explicit(None)
        .with_home(Some(home.path().to_path_buf()))
        .resolve()
        .unwrap();

    let resolver = CatalogResolver::builder().config(config).build().unwrap();
    assert!(!resolver.has_registries());
}
