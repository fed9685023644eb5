//! Zone File Integration Tests
//!
//! Verify that the shipped zones file and ad-hoc zone files load through the
//! public API and behave the same as the built-in registry.
//!
//! Run with: cargo test --test zone_file_integration

use floodzone_service::analysis::assess;
use floodzone_service::config::ServiceConfig;
use floodzone_service::model::{RegistryError, SimulationParameters};
use floodzone_service::zones::{self, ZoneRegistry};
use std::fs;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn write_fixture(file_name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("floodzone_tests_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be writable");
    let path = dir.join(file_name);
    fs::write(&path, contents).expect("fixture should be writable");
    path
}

// ---------------------------------------------------------------------------
// Shipped data
// ---------------------------------------------------------------------------

#[test]
fn test_shipped_zones_file_matches_builtin_registry() {
    let loaded =
        zones::load_zones("./zones/asuncion.toml").expect("zones/asuncion.toml should load");
    assert_eq!(loaded, ZoneRegistry::default_city());
}

#[test]
fn test_shipped_zones_file_gives_same_assessment() {
    let params = SimulationParameters::new(75.0, 4.0, 6.0).expect("in range");
    let loaded =
        zones::load_zones("./zones/asuncion.toml").expect("zones/asuncion.toml should load");
    assert_eq!(
        assess(&loaded, &params),
        assess(&ZoneRegistry::default_city(), &params)
    );
}

#[test]
fn test_example_config_parses_and_points_at_shipped_zones() {
    let text = fs::read_to_string("./floodzone.toml.example").expect("example config present");
    let config = ServiceConfig::from_toml_str(&text, "floodzone.toml.example")
        .expect("example config parses");
    assert_eq!(config.registry.zones_file.as_deref(), Some("zones/asuncion.toml"));
    assert_eq!(config.simulation_parameters(), Ok(SimulationParameters::default()));
}

// ---------------------------------------------------------------------------
// Other cities
// ---------------------------------------------------------------------------

#[test]
fn test_custom_city_loads_in_file_order() {
    let path = write_fixture(
        "riverside.toml",
        r#"
        [[zone]]
        name = "Waterfront"
        latitude = 40.69
        longitude = -89.59
        vulnerability = 5
        elevation = 30.0

        [[zone]]
        name = "Bluffs"
        latitude = 40.72
        longitude = -89.61
        vulnerability = 1
        elevation = 150.0
        "#,
    );
    let registry = zones::load_zones(&path).expect("fixture should load");
    assert_eq!(registry.names(), vec!["Waterfront", "Bluffs"]);

    let assessment = assess(&registry, &SimulationParameters::default());
    assert_eq!(assessment.danger_zone_names(), vec!["Waterfront"]);
}

#[test]
fn test_file_with_duplicate_zone_is_rejected() {
    let path = write_fixture(
        "duplicate.toml",
        r#"
        [[zone]]
        name = "Twice"
        latitude = 0.0
        longitude = 0.0
        vulnerability = 3
        elevation = 50.0

        [[zone]]
        name = "Twice"
        latitude = 1.0
        longitude = 1.0
        vulnerability = 3
        elevation = 60.0
        "#,
    );
    assert_eq!(
        zones::load_zones(&path),
        Err(RegistryError::DuplicateName("Twice".to_string()))
    );
}

#[test]
fn test_file_with_no_zones_gives_empty_assessment() {
    let path = write_fixture("empty.toml", "# no zones yet\n");
    let registry = zones::load_zones(&path).expect("empty file is valid");
    let assessment = assess(&registry, &SimulationParameters::default());
    assert!(assessment.is_empty());
    assert!(assessment.danger_zone_names().is_empty());
}

#[test]
fn test_vulnerability_too_large_for_rating_is_rejected() {
    let path = write_fixture(
        "bad_rating.toml",
        r#"
        [[zone]]
        name = "Overrated"
        latitude = 0.0
        longitude = 0.0
        vulnerability = 9
        elevation = 50.0
        "#,
    );
    assert!(matches!(
        zones::load_zones(&path),
        Err(RegistryError::VulnerabilityOutOfRange { value: 9, .. })
    ));
}
