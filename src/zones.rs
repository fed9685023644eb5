/// Zone registry for the flood-zone risk service.
///
/// Holds the ordered list of neighborhoods evaluated on every pass. The
/// built-in dataset covers greater Asunción; other cities are loaded from a
/// TOML file with one `[[zone]]` table per neighborhood. Registry order is
/// display order everywhere unless a view explicitly re-sorts.

use crate::logging::{self, Component};
use crate::model::{RegistryError, VULNERABILITY_RANGE, Zone};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Built-in dataset
// ---------------------------------------------------------------------------

/// Static form of a zone used for the compiled-in dataset.
pub struct ZoneSeed {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub vulnerability: u8,
    pub elevation: f64,
}

impl From<&ZoneSeed> for Zone {
    fn from(seed: &ZoneSeed) -> Self {
        Zone {
            name: seed.name.to_string(),
            latitude: seed.latitude,
            longitude: seed.longitude,
            vulnerability: seed.vulnerability,
            elevation: seed.elevation,
        }
    }
}

/// Twelve neighborhoods of greater Asunción, ordered from the historic
/// centre outward. The Bañado settlements along the Paraguay River are the
/// lowest and most exposed.
pub static ASUNCION_ZONES: &[ZoneSeed] = &[
    ZoneSeed {
        name: "Centro Histórico",
        latitude: -25.2819,
        longitude: -57.6350,
        vulnerability: 4,
        elevation: 65.0,
    },
    ZoneSeed {
        name: "Sajonia",
        latitude: -25.2700,
        longitude: -57.6450,
        vulnerability: 5,
        elevation: 45.0,
    },
    ZoneSeed {
        name: "Recoleta",
        latitude: -25.2900,
        longitude: -57.6100,
        vulnerability: 2,
        elevation: 95.0,
    },
    ZoneSeed {
        name: "Villa Morra",
        latitude: -25.2950,
        longitude: -57.5800,
        vulnerability: 2,
        elevation: 110.0,
    },
    ZoneSeed {
        name: "San Lorenzo",
        latitude: -25.3400,
        longitude: -57.5100,
        vulnerability: 3,
        elevation: 85.0,
    },
    ZoneSeed {
        name: "Luque",
        latitude: -25.2700,
        longitude: -57.4900,
        vulnerability: 3,
        elevation: 90.0,
    },
    ZoneSeed {
        name: "Lambaré",
        latitude: -25.3500,
        longitude: -57.6100,
        vulnerability: 4,
        elevation: 55.0,
    },
    ZoneSeed {
        name: "Fernando de la Mora",
        latitude: -25.3200,
        longitude: -57.5500,
        vulnerability: 3,
        elevation: 80.0,
    },
    ZoneSeed {
        name: "Zeballos Cué",
        latitude: -25.2600,
        longitude: -57.5700,
        vulnerability: 5,
        elevation: 50.0,
    },
    ZoneSeed {
        name: "Bañado Norte",
        latitude: -25.2550,
        longitude: -57.6300,
        vulnerability: 5,
        elevation: 40.0,
    },
    ZoneSeed {
        name: "Bañado Sur",
        latitude: -25.3100,
        longitude: -57.6400,
        vulnerability: 5,
        elevation: 42.0,
    },
    ZoneSeed {
        name: "Trinidad",
        latitude: -25.3050,
        longitude: -57.5650,
        vulnerability: 2,
        elevation: 100.0,
    },
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Validated, read-only sequence of zones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Validates and wraps `zones`, keeping their order. An empty list is
    /// accepted; downstream aggregates simply come out empty.
    pub fn new(zones: Vec<Zone>) -> Result<Self, RegistryError> {
        validate_all(&zones)?;
        Ok(Self { zones })
    }

    /// The compiled-in Asunción dataset.
    pub fn default_city() -> Self {
        Self {
            zones: ASUNCION_ZONES.iter().map(Zone::from).collect(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    /// Looks up a zone by exact name. Returns `None` if not found.
    pub fn find_zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }
}

fn validate_all(zones: &[Zone]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for (index, zone) in zones.iter().enumerate() {
        validate_zone(index, zone)?;
        if !seen.insert(zone.name.as_str()) {
            return Err(RegistryError::DuplicateName(zone.name.clone()));
        }
    }
    Ok(())
}

fn validate_zone(index: usize, zone: &Zone) -> Result<(), RegistryError> {
    if zone.name.trim().is_empty() {
        return Err(RegistryError::EmptyName { index });
    }
    let (min_v, max_v) = VULNERABILITY_RANGE;
    if zone.vulnerability < min_v || zone.vulnerability > max_v {
        return Err(RegistryError::VulnerabilityOutOfRange {
            zone: zone.name.clone(),
            value: zone.vulnerability,
        });
    }
    if !zone.elevation.is_finite() || zone.elevation <= 0.0 {
        return Err(RegistryError::InvalidElevation {
            zone: zone.name.clone(),
            value: zone.elevation,
        });
    }
    let lat_ok = zone.latitude.is_finite() && zone.latitude.abs() <= 90.0;
    let lon_ok = zone.longitude.is_finite() && zone.longitude.abs() <= 180.0;
    if !lat_ok || !lon_ok {
        return Err(RegistryError::InvalidCoordinates {
            zone: zone.name.clone(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TOML loading
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ZoneFile {
    #[serde(rename = "zone", default)]
    zones: Vec<Zone>,
}

/// Parses a `[[zone]]` document. `origin` only labels error messages.
pub fn parse_zones(toml_text: &str, origin: &str) -> Result<ZoneRegistry, RegistryError> {
    let file: ZoneFile = toml::from_str(toml_text).map_err(|e| RegistryError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    ZoneRegistry::new(file.zones)
}

/// Reads and validates a zones file.
pub fn load_zones<P: AsRef<Path>>(path: P) -> Result<ZoneRegistry, RegistryError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
        path: origin.clone(),
        message: e.to_string(),
    })?;

    let registry = parse_zones(&text, &origin)?;
    logging::info(
        Component::Registry,
        None,
        &format!("Loaded {} zones from {}", registry.len(), origin),
    );
    if registry.is_empty() {
        logging::warn(Component::Registry, None, &format!("{} defines no zones", origin));
    }
    Ok(registry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, vulnerability: u8, elevation: f64) -> Zone {
        Zone {
            name: name.to_string(),
            latitude: -25.3,
            longitude: -57.6,
            vulnerability,
            elevation,
        }
    }

    #[test]
    fn test_default_city_has_twelve_zones_in_declared_order() {
        let registry = ZoneRegistry::default_city();
        assert_eq!(registry.len(), 12);
        let names = registry.names();
        assert_eq!(names.first(), Some(&"Centro Histórico"));
        assert_eq!(names.last(), Some(&"Trinidad"));
    }

    #[test]
    fn test_default_city_passes_validation() {
        // Round the built-in data through the validating constructor so a
        // bad edit to ASUNCION_ZONES fails here rather than at runtime.
        let zones = ZoneRegistry::default_city().zones().to_vec();
        assert!(ZoneRegistry::new(zones).is_ok());
    }

    #[test]
    fn test_find_zone_returns_correct_entry() {
        let registry = ZoneRegistry::default_city();
        let zone = registry
            .find_zone("Bañado Norte")
            .expect("Bañado Norte should be in registry");
        assert_eq!(zone.vulnerability, 5);
        assert_eq!(zone.elevation, 40.0);
    }

    #[test]
    fn test_find_zone_returns_none_for_unknown_name() {
        assert!(ZoneRegistry::default_city().find_zone("Atlántida").is_none());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = ZoneRegistry::new(vec![zone("Sajonia", 5, 45.0), zone("Sajonia", 4, 50.0)]);
        assert_eq!(result, Err(RegistryError::DuplicateName("Sajonia".to_string())));
    }

    #[test]
    fn test_vulnerability_outside_one_to_five_is_rejected() {
        assert!(ZoneRegistry::new(vec![zone("A", 0, 45.0)]).is_err());
        assert!(ZoneRegistry::new(vec![zone("A", 6, 45.0)]).is_err());
        assert!(ZoneRegistry::new(vec![zone("A", 1, 45.0), zone("B", 5, 45.0)]).is_ok());
    }

    #[test]
    fn test_non_positive_elevation_is_rejected() {
        assert!(matches!(
            ZoneRegistry::new(vec![zone("A", 3, 0.0)]),
            Err(RegistryError::InvalidElevation { .. })
        ));
        assert!(ZoneRegistry::new(vec![zone("A", 3, f64::NAN)]).is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = ZoneRegistry::new(vec![zone("ok", 3, 50.0), zone("   ", 3, 50.0)]);
        assert_eq!(result, Err(RegistryError::EmptyName { index: 1 }));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let mut bad = zone("A", 3, 50.0);
        bad.latitude = 95.0;
        assert!(matches!(
            ZoneRegistry::new(vec![bad]),
            Err(RegistryError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let registry = ZoneRegistry::new(Vec::new()).expect("empty registry is allowed");
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_parse_zones_keeps_file_order() {
        let text = r#"
            [[zone]]
            name = "Low"
            latitude = -25.25
            longitude = -57.63
            vulnerability = 5
            elevation = 40.0

            [[zone]]
            name = "High"
            latitude = -25.29
            longitude = -57.58
            vulnerability = 2
            elevation = 110.0
        "#;
        let registry = parse_zones(text, "inline").expect("valid zones document");
        assert_eq!(registry.names(), vec!["Low", "High"]);
    }

    #[test]
    fn test_parse_zones_without_tables_is_empty() {
        let registry = parse_zones("", "inline").expect("empty document is valid");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parse_zones_reports_missing_field() {
        let text = r#"
            [[zone]]
            name = "NoElevation"
            latitude = -25.25
            longitude = -57.63
            vulnerability = 5
        "#;
        assert!(matches!(
            parse_zones(text, "inline"),
            Err(RegistryError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_zones_rejects_misspelled_field() {
        let text = r#"
            [[zone]]
            name = "Typo"
            latitude = -25.25
            longitude = -57.63
            vulnerability = 5
            elevation = 40.0
            elevaton = 45.0
        "#;
        assert!(matches!(
            parse_zones(text, "inline"),
            Err(RegistryError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_zones_rejects_misspelled_table() {
        let text = r#"
            [[zones]]
            name = "Plural"
            latitude = -25.25
            longitude = -57.63
            vulnerability = 5
            elevation = 40.0
        "#;
        assert!(parse_zones(text, "inline").is_err());
    }

    #[test]
    fn test_load_zones_reports_missing_file() {
        let result = load_zones("/nonexistent/zones.toml");
        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }
}
