//! Catalog loading and validation against on-disk fixtures

use pretty_assertions::assert_eq;
use shipquote::{validate_catalog, MethodCatalog};
use tempfile::TempDir;

const GOOD_CATALOG: &str = r#"
version: 1
methods:
  - code: STANDARD
    name: Standard Delivery
    base_cost: 4.99
    display_order: 10
    criteria:
      supported_countries: [GB, IE]
  - code: EXPRESS
    name: Express Delivery
    base_cost: 9.99
    display_order: 20
    tariff:
      free_allowance: 1000
      per_kg: 1.50
    criteria:
      supported_countries: [GB]
      min_order_value: 20
"#;

#[test]
fn test_load_good_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("methods.yaml");
    std::fs::write(&path, GOOD_CATALOG).unwrap();

    let catalog = MethodCatalog::load(&path).unwrap();
    assert_eq!(catalog.methods.len(), 2);

    let report = validate_catalog(&catalog);
    assert!(!report.has_errors(), "{:?}", report.issues);
    assert!(report.passed(true));
}

#[test]
fn test_load_directory_merges_sorted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("10_standard.yaml"),
        "code: STANDARD\nname: Standard\nbase_cost: 4.99\ncriteria:\n  supported_countries: [GB]\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("20_express.yml"),
        "code: EXPRESS\nname: Express\nbase_cost: 9.99\ncriteria:\n  supported_countries: [GB]\n",
    )
    .unwrap();

    let catalog = MethodCatalog::load(dir.path()).unwrap();
    let codes: Vec<_> = catalog.methods.iter().map(|m| m.code.as_str()).collect();
    assert_eq!(codes, ["STANDARD", "EXPRESS"]);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(MethodCatalog::load(&missing).is_err());
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "version: 1\nmethods: [not a method").unwrap();
    assert!(MethodCatalog::load(&path).is_err());
}

#[test]
fn test_bad_version_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("v2.yaml");
    std::fs::write(&path, "version: 2\nmethods: []\n").unwrap();
    let err = MethodCatalog::load(&path).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn test_validation_flags_broken_config() {
    let catalog = MethodCatalog::from_yaml(
        r#"
version: 1
methods:
  - code: BROKEN
    name: Broken Method
    base_cost: -1
    criteria:
      supported_countries: []
      min_order_value: 100
      max_order_value: 50
"#,
    )
    .unwrap();

    let report = validate_catalog(&catalog);
    assert!(report.has_errors());
    let codes: Vec<_> = report.issues.iter().map(|i| i.code.as_str()).collect();
    assert!(codes.contains(&"E003"), "negative base cost: {:?}", codes);
    assert!(codes.contains(&"E004"), "inverted value bounds: {:?}", codes);
    assert!(codes.contains(&"W001"), "empty countries: {:?}", codes);

    let text = report.to_report();
    assert!(text.contains("E003"));
    assert!(text.contains("error(s)"));
}

#[test]
fn test_strict_mode_promotes_warnings() {
    let catalog = MethodCatalog::from_yaml(
        r#"
version: 1
methods:
  - code: STANDARD
    name: Standard
    criteria:
      supported_countries: [GB]
      free_shipping_threshold: 60
"#,
    )
    .unwrap();

    let report = validate_catalog(&catalog);
    assert!(!report.has_errors());
    assert!(report.has_warnings());
    assert!(report.passed(false));
    assert!(!report.passed(true));
}
