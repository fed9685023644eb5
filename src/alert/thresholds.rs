//! Flood risk scoring and category thresholds.
//!
//! The score is an empirical heuristic combining rainfall volume, rainfall
//! intensity, a low-ground penalty and a river-backflow penalty for zones
//! below the river's reach. Its coefficients are tuning constants and are
//! kept exactly as calibrated.
//!
//! Everything here is pure: no I/O, no shared state. Inputs are assumed to
//! have passed `SimulationParameters::new` and registry validation.

use crate::model::{RiskCategory, RiskResult, SimulationParameters, Zone};

/// Rainfall volume normaliser (mm).
pub const RAINFALL_SCALE_MM: f64 = 30.0;
/// Rainfall intensity normaliser (mm/h).
pub const INTENSITY_SCALE_MM_PER_H: f64 = 20.0;
/// Elevation at and above which low-ground penalty vanishes (m).
pub const LOW_GROUND_CEILING_M: f64 = 80.0;
/// Metres of elevation per unit of low-ground penalty.
pub const LOW_GROUND_SPAN_M: f64 = 40.0;
/// Zones strictly below this elevation feel the river level (m).
pub const RIVER_REACH_M: f64 = 60.0;
/// River level divisor (m).
pub const RIVER_SCALE_M: f64 = 5.0;

/// Scores below this are Safe.
pub const CAUTION_THRESHOLD: f64 = 1.5;
/// Scores below this (and at least `CAUTION_THRESHOLD`) are Caution.
pub const DANGER_THRESHOLD: f64 = 3.0;

/// Raw risk score for one zone.
///
/// ```text
/// intensity        = rainfall / duration
/// elevation_factor = max(0, (80 - elevation) / 40)
/// river_factor     = river_level / 5   if elevation < 60, else 0
/// score = vulnerability * (rainfall / 30) * (intensity / 20)
///         + elevation_factor + river_factor
/// ```
pub fn risk_score(
    vulnerability: u8,
    rainfall_mm: f64,
    duration_hours: f64,
    elevation: f64,
    river_level_m: f64,
) -> f64 {
    let intensity = rainfall_mm / duration_hours;
    let elevation_factor = elevation_factor(elevation);
    let river_factor = river_factor(elevation, river_level_m);

    f64::from(vulnerability)
        * (rainfall_mm / RAINFALL_SCALE_MM)
        * (intensity / INTENSITY_SCALE_MM_PER_H)
        + elevation_factor
        + river_factor
}

/// Low-ground penalty: grows linearly below 80 m, zero above.
pub fn elevation_factor(elevation: f64) -> f64 {
    f64::max(0.0, (LOW_GROUND_CEILING_M - elevation) / LOW_GROUND_SPAN_M)
}

/// River backflow penalty, applied only to zones below 60 m.
pub fn river_factor(elevation: f64, river_level_m: f64) -> f64 {
    if elevation < RIVER_REACH_M {
        river_level_m / RIVER_SCALE_M
    } else {
        0.0
    }
}

/// Maps a score onto a category. Both thresholds are exclusive upper bounds,
/// so a score of exactly 1.5 is Caution and exactly 3 is Danger.
pub fn classify_score(score: f64) -> RiskCategory {
    if score < CAUTION_THRESHOLD {
        RiskCategory::Safe
    } else if score < DANGER_THRESHOLD {
        RiskCategory::Caution
    } else {
        RiskCategory::Danger
    }
}

/// Scores and classifies raw zone attributes under `params`.
pub fn evaluate(vulnerability: u8, elevation: f64, params: &SimulationParameters) -> RiskResult {
    let score = risk_score(
        vulnerability,
        params.rainfall_mm(),
        params.duration_hours(),
        elevation,
        params.river_level_m(),
    );
    let category = classify_score(score);
    RiskResult {
        category,
        risk_level: category.risk_level(),
        score,
    }
}

/// Convenience wrapper over [`evaluate`] for a registry zone.
pub fn evaluate_zone(zone: &Zone, params: &SimulationParameters) -> RiskResult {
    evaluate(zone.vulnerability, zone.elevation, params)
}
