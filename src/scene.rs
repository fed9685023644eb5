//! Render-ready scene for the terrain view and the marker map.
//!
//! The renderers themselves live outside this crate. They receive a `Scene`
//! (usually as JSON) and own all visual encoding; this module only decides
//! what goes into each layer.

use crate::analysis::{Assessment, CategoryCounts, WaterArea, ZoneAssessment};
use crate::alert::AlertLevel;
use crate::model::{RiskCategory, Rgba, SimulationParameters, ViewParameters};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fill for the translucent ring drawn around Danger zones.
pub const DANGER_PULSE_COLOR: Rgba = Rgba([239, 68, 68, 80]);
/// Fill for projected water columns.
pub const WATER_COLOR: Rgba = Rgba([65, 145, 255, 140]);

/// Per-zone column and marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneFeature {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub category: RiskCategory,
    pub risk_level: u8,
    pub label: &'static str,
    pub display_color: Rgba,
    pub marker_color: String,
    pub display_height: f64,
}

impl From<&ZoneAssessment> for ZoneFeature {
    fn from(zone: &ZoneAssessment) -> Self {
        ZoneFeature {
            name: zone.name.clone(),
            latitude: zone.latitude,
            longitude: zone.longitude,
            elevation: zone.elevation,
            category: zone.category,
            risk_level: zone.risk_level,
            label: zone.category.label(),
            display_color: zone.display_color,
            marker_color: zone.display_color.to_hex(),
            display_height: zone.display_height,
        }
    }
}

/// Ring around a Danger zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DangerPulse {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: Rgba,
}

/// Water column over a low-lying zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterColumn {
    #[serde(flatten)]
    pub area: WaterArea,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Rgba,
}

/// Everything the renderers need for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub generated_at: DateTime<Utc>,
    pub parameters: SimulationParameters,
    pub view: ViewParameters,
    pub alert_level: AlertLevel,
    pub counts: CategoryCounts,
    pub zones: Vec<ZoneFeature>,
    /// Absent when no zone is at Danger, so renderers add no pulse layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_pulses: Option<Vec<DangerPulse>>,
    pub water: Vec<WaterColumn>,
    pub legend: Vec<LegendEntry>,
}

/// Builds a scene stamped with `generated_at`.
pub fn build_scene_at(
    assessment: &Assessment,
    view: &ViewParameters,
    generated_at: DateTime<Utc>,
) -> Scene {
    let pulses: Vec<DangerPulse> = assessment
        .in_category(RiskCategory::Danger)
        .into_iter()
        .map(|z| DangerPulse {
            name: z.name.clone(),
            latitude: z.latitude,
            longitude: z.longitude,
            color: DANGER_PULSE_COLOR,
        })
        .collect();

    Scene {
        generated_at,
        parameters: *assessment.parameters(),
        view: *view,
        alert_level: assessment.alert_level(),
        counts: assessment.counts(),
        zones: assessment.zones().iter().map(ZoneFeature::from).collect(),
        danger_pulses: (!pulses.is_empty()).then_some(pulses),
        water: assessment
            .low_lying_areas()
            .into_iter()
            .map(|area| WaterColumn { area, color: WATER_COLOR })
            .collect(),
        legend: legend(),
    }
}

/// Builds a scene stamped with the current time.
pub fn build_scene(assessment: &Assessment, view: &ViewParameters) -> Scene {
    build_scene_at(assessment, view, Utc::now())
}

fn legend() -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = RiskCategory::ALL
        .iter()
        .map(|c| LegendEntry {
            key: c.key(),
            label: c.label(),
            color: c.display_color(),
        })
        .collect();
    entries.push(LegendEntry {
        key: "water",
        label: "Agua",
        color: WATER_COLOR,
    });
    entries
}

pub fn scene_json(scene: &Scene) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(scene)
}
