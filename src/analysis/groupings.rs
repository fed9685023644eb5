/// Per-zone assessment and the aggregates the dashboard panels read.
///
/// `assess` runs every registry zone through the evaluator and returns an
/// `Assessment`, which keeps registry order and offers the sorted and
/// filtered views the terrain map, marker map and analytics table need.
/// Every view degrades to empty output when the registry is empty.

use crate::alert::levels::{self, AlertLevel, Recommendation};
use crate::alert::thresholds::evaluate_zone;
use crate::logging::{self, Component};
use crate::model::{RiskCategory, Rgba, SimulationParameters, Zone};
use crate::zones::ZoneRegistry;
use serde::Serialize;

/// Column height multiplier applied to elevation for 3D extrusion.
pub const DISPLAY_HEIGHT_SCALE: f64 = 20.0;

/// Zones strictly below this elevation get a projected water column (m).
pub const LOW_LYING_ELEVATION_M: f64 = 55.0;

/// Number of Safe zones suggested as detours during a red alert.
const DETOUR_SUGGESTIONS: usize = 2;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One zone's attributes joined with its risk evaluation. This is the tuple
/// handed to the renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneAssessment {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub vulnerability: u8,
    pub category: RiskCategory,
    pub risk_level: u8,
    pub score: f64,
    pub display_color: Rgba,
    pub display_height: f64,
}

impl ZoneAssessment {
    fn new(zone: &Zone, params: &SimulationParameters) -> Self {
        let result = evaluate_zone(zone, params);
        ZoneAssessment {
            name: zone.name.clone(),
            latitude: zone.latitude,
            longitude: zone.longitude,
            elevation: zone.elevation,
            vulnerability: zone.vulnerability,
            category: result.category,
            risk_level: result.risk_level,
            score: result.score,
            display_color: result.category.display_color(),
            display_height: zone.elevation * DISPLAY_HEIGHT_SCALE,
        }
    }
}

/// Projected standing water over a low-lying zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterArea {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub water_height: f64,
}

/// Zone counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub safe: usize,
    pub caution: usize,
    pub danger: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.safe + self.caution + self.danger
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Enriched result set for one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    parameters: SimulationParameters,
    zones: Vec<ZoneAssessment>,
}

/// Evaluates every zone in `registry` under `params`, in registry order.
pub fn assess(registry: &ZoneRegistry, params: &SimulationParameters) -> Assessment {
    let zones: Vec<ZoneAssessment> = registry
        .zones()
        .iter()
        .map(|zone| {
            let assessed = ZoneAssessment::new(zone, params);
            logging::debug(
                Component::Evaluator,
                Some(&assessed.name),
                &format!("score {:.3} -> {}", assessed.score, assessed.category.key()),
            );
            assessed
        })
        .collect();

    let assessment = Assessment {
        parameters: *params,
        zones,
    };
    logging::log_assessment_summary(&assessment.counts());
    assessment
}

impl Assessment {
    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Zones in registry order.
    pub fn zones(&self) -> &[ZoneAssessment] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn count(&self, category: RiskCategory) -> usize {
        self.zones.iter().filter(|z| z.category == category).count()
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            safe: self.count(RiskCategory::Safe),
            caution: self.count(RiskCategory::Caution),
            danger: self.count(RiskCategory::Danger),
        }
    }

    /// Zones at `category`, registry order.
    pub fn in_category(&self, category: RiskCategory) -> Vec<&ZoneAssessment> {
        self.zones.iter().filter(|z| z.category == category).collect()
    }

    /// Names of Danger zones, registry order.
    pub fn danger_zone_names(&self) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| z.category == RiskCategory::Danger)
            .map(|z| z.name.as_str())
            .collect()
    }

    /// Elevation profile, lowest first. Ties keep registry order.
    pub fn sorted_by_elevation(&self) -> Vec<&ZoneAssessment> {
        let mut sorted: Vec<&ZoneAssessment> = self.zones.iter().collect();
        sorted.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
        sorted
    }

    /// Detail table order: highest risk level first. Ties keep registry order.
    pub fn sorted_by_risk(&self) -> Vec<&ZoneAssessment> {
        let mut sorted: Vec<&ZoneAssessment> = self.zones.iter().collect();
        sorted.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
        sorted
    }

    /// Zones below 55 m with their projected water column height,
    /// `river_level * 100 + rainfall * 2`.
    pub fn low_lying_areas(&self) -> Vec<WaterArea> {
        let water_height =
            self.parameters.river_level_m() * 100.0 + self.parameters.rainfall_mm() * 2.0;
        self.zones
            .iter()
            .filter(|z| z.elevation < LOW_LYING_ELEVATION_M)
            .map(|z| WaterArea {
                name: z.name.clone(),
                latitude: z.latitude,
                longitude: z.longitude,
                elevation: z.elevation,
                water_height,
            })
            .collect()
    }

    /// Worst category present, `None` when there are no zones.
    pub fn worst_category(&self) -> Option<RiskCategory> {
        self.zones.iter().map(|z| z.category).max()
    }

    pub fn alert_level(&self) -> AlertLevel {
        AlertLevel::from_worst(self.worst_category())
    }

    /// Highest-ground Safe zones, suggested as detours.
    pub fn detour_zone_names(&self) -> Vec<&str> {
        let mut safe = self.in_category(RiskCategory::Safe);
        safe.sort_by(|a, b| b.elevation.total_cmp(&a.elevation));
        safe.into_iter()
            .take(DETOUR_SUGGESTIONS)
            .map(|z| z.name.as_str())
            .collect()
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        levels::recommendations(
            self.alert_level(),
            &self.danger_zone_names(),
            &self.detour_zone_names(),
        )
    }
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

    fn params(rainfall: f64, duration: f64, river: f64) -> SimulationParameters {
        SimulationParameters::new(rainfall, duration, river).expect("test parameters are in range")
    }

    #[test]
    fn test_assessment_keeps_registry_order() {
        let registry = ZoneRegistry::default_city();
        let assessment = assess(&registry, &SimulationParameters::default());
        let names: Vec<&str> = assessment.zones().iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, registry.names());
    }

    #[test]
    fn test_default_scenario_categories() {
        // 30 mm over 3 h, river at 3.5 m.
        let assessment = assess(&ZoneRegistry::default_city(), &SimulationParameters::default());
        let counts = assessment.counts();
        assert_eq!(counts.total(), 12);
        assert_eq!(
            assessment.danger_zone_names(),
            vec!["Sajonia", "Lambaré", "Zeballos Cué", "Bañado Norte", "Bañado Sur"]
        );
        assert_eq!(counts.danger, 5);
        assert_eq!(counts.caution, 4);
        assert_eq!(counts.safe, 3);
        assert_eq!(assessment.alert_level(), AlertLevel::Red);
    }

    #[test]
    fn test_display_fields_follow_category_and_elevation() {
        let registry = ZoneRegistry::new(vec![zone("Low", 5, 40.0)]).expect("valid zone");
        let assessment = assess(&registry, &SimulationParameters::default());
        let low = &assessment.zones()[0];
        assert_eq!(low.category, RiskCategory::Danger);
        assert_eq!(low.display_color, RiskCategory::Danger.display_color());
        assert_eq!(low.display_height, 800.0);
    }

    #[test]
    fn test_empty_registry_yields_empty_assessment() {
        let assessment = assess(&ZoneRegistry::default(), &SimulationParameters::default());
        assert!(assessment.is_empty());
        assert_eq!(assessment.counts(), CategoryCounts::default());
        assert!(assessment.danger_zone_names().is_empty());
        assert!(assessment.low_lying_areas().is_empty());
        assert!(assessment.sorted_by_risk().is_empty());
        assert_eq!(assessment.worst_category(), None);
        assert_eq!(assessment.alert_level(), AlertLevel::Normal);
        assert_eq!(assessment.recommendations().len(), 2);
    }

    #[test]
    fn test_sorted_by_risk_is_descending_and_stable() {
        let registry = ZoneRegistry::new(vec![
            zone("SafeA", 1, 120.0),
            zone("DangerA", 5, 40.0),
            zone("SafeB", 1, 130.0),
            zone("DangerB", 5, 42.0),
        ])
        .expect("valid zones");
        let assessment = assess(&registry, &SimulationParameters::default());
        let order: Vec<&str> = assessment
            .sorted_by_risk()
            .iter()
            .map(|z| z.name.as_str())
            .collect();
        assert_eq!(order, vec!["DangerA", "DangerB", "SafeA", "SafeB"]);
    }

    #[test]
    fn test_sorted_by_elevation_is_ascending() {
        let assessment = assess(&ZoneRegistry::default_city(), &SimulationParameters::default());
        let elevations: Vec<f64> = assessment
            .sorted_by_elevation()
            .iter()
            .map(|z| z.elevation)
            .collect();
        assert!(elevations.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(elevations.first(), Some(&40.0));
        assert_eq!(elevations.last(), Some(&110.0));
    }

    #[test]
    fn test_low_lying_areas_use_strict_threshold() {
        let registry = ZoneRegistry::new(vec![
            zone("Below", 3, 54.9),
            zone("AtLimit", 3, 55.0),
            zone("Above", 3, 70.0),
        ])
        .expect("valid zones");
        let assessment = assess(&registry, &params(40.0, 4.0, 2.0));
        let areas = assessment.low_lying_areas();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "Below");
        // 2.0 * 100 + 40 * 2
        assert_eq!(areas[0].water_height, 280.0);
    }

    #[test]
    fn test_dry_conditions_produce_yellow_or_normal() {
        let registry = ZoneRegistry::new(vec![zone("Hill", 5, 120.0)]).expect("valid zone");
        let assessment = assess(&registry, &params(0.0, 1.0, 0.0));
        assert_eq!(assessment.alert_level(), AlertLevel::Normal);

        let registry = ZoneRegistry::new(vec![zone("Slope", 5, 20.0)]).expect("valid zone");
        let assessment = assess(&registry, &params(0.0, 1.0, 0.0));
        // (80 - 20) / 40 = 1.5, exactly the caution threshold.
        assert_eq!(assessment.alert_level(), AlertLevel::Yellow);
    }

    #[test]
    fn test_detours_are_highest_safe_zones() {
        let assessment = assess(&ZoneRegistry::default_city(), &SimulationParameters::default());
        assert_eq!(assessment.detour_zone_names(), vec!["Villa Morra", "Trinidad"]);
        let recs = assessment.recommendations();
        assert!(recs[1].detail.contains("Villa Morra"));
    }
}
