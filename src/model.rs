/// Core data types for the flood-zone risk service.
///
/// This module defines the shared domain model imported by all other modules:
/// zones, simulation and view parameters, risk categories and results, and
/// the boundary validation errors. It performs no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Parameter ranges
// ---------------------------------------------------------------------------

/// Accepted rainfall range in millimetres (inclusive).
pub const RAINFALL_RANGE_MM: (f64, f64) = (0.0, 150.0);

/// Accepted rainfall duration range in hours (inclusive). Zero is rejected.
pub const DURATION_RANGE_HOURS: (f64, f64) = (1.0, 12.0);

/// Accepted river level range in metres (inclusive).
pub const RIVER_LEVEL_RANGE_M: (f64, f64) = (0.0, 10.0);

/// Camera pitch range in degrees.
pub const PITCH_RANGE_DEG: (f64, f64) = (0.0, 70.0);

/// Camera bearing range in degrees.
pub const BEARING_RANGE_DEG: (f64, f64) = (-180.0, 180.0);

/// Map zoom range.
pub const ZOOM_RANGE: (f64, f64) = (9.0, 14.0);

/// Vulnerability ratings run from 1 (least susceptible) to 5.
pub const VULNERABILITY_RANGE: (u8, u8) = (1, 5);

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// A fixed geographic neighborhood with static flood attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    pub name: String,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Inherent susceptibility to flooding, 1–5.
    pub vulnerability: u8,
    /// Metres above the reference datum.
    pub elevation: f64,
}

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

/// Weather and river inputs for one evaluation pass.
///
/// Construct through [`SimulationParameters::new`] so that out-of-range
/// values never reach the evaluator. Fields are private for that reason.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    rainfall_mm: f64,
    duration_hours: f64,
    river_level_m: f64,
}

impl SimulationParameters {
    pub fn new(
        rainfall_mm: f64,
        duration_hours: f64,
        river_level_m: f64,
    ) -> Result<Self, ParameterError> {
        check_range("rainfall_mm", rainfall_mm, RAINFALL_RANGE_MM)?;
        check_range("duration_hours", duration_hours, DURATION_RANGE_HOURS)?;
        check_range("river_level_m", river_level_m, RIVER_LEVEL_RANGE_M)?;
        Ok(Self {
            rainfall_mm,
            duration_hours,
            river_level_m,
        })
    }

    pub fn rainfall_mm(&self) -> f64 {
        self.rainfall_mm
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn river_level_m(&self) -> f64 {
        self.river_level_m
    }
}

impl Default for SimulationParameters {
    /// The dashboard's initial slider positions.
    fn default() -> Self {
        Self {
            rainfall_mm: 30.0,
            duration_hours: 3.0,
            river_level_m: 3.5,
        }
    }
}

// ---------------------------------------------------------------------------
// View parameters
// ---------------------------------------------------------------------------

/// Camera state forwarded to the terrain renderer. The evaluator never reads
/// these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewParameters {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub zoom: f64,
}

impl ViewParameters {
    /// Builds a view centred on the default city with the given camera.
    pub fn new(pitch: f64, bearing: f64, zoom: f64) -> Result<Self, ParameterError> {
        check_range("pitch", pitch, PITCH_RANGE_DEG)?;
        check_range("bearing", bearing, BEARING_RANGE_DEG)?;
        check_range("zoom", zoom, ZOOM_RANGE)?;
        Ok(Self {
            pitch,
            bearing,
            zoom,
            ..Self::default()
        })
    }

    pub fn centered_on(mut self, latitude: f64, longitude: f64) -> Self {
        self.center_latitude = latitude;
        self.center_longitude = longitude;
        self
    }
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            center_latitude: -25.2900,
            center_longitude: -57.5700,
            pitch: 50.0,
            bearing: -20.0,
            zoom: 11.0,
        }
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ParameterError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Risk types
// ---------------------------------------------------------------------------

/// Flood risk categories, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Safe,
    Caution,
    Danger,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Safe,
        RiskCategory::Caution,
        RiskCategory::Danger,
    ];

    /// Integer encoding used for sorting and display: 0, 1, 2.
    pub fn risk_level(self) -> u8 {
        match self {
            RiskCategory::Safe => 0,
            RiskCategory::Caution => 1,
            RiskCategory::Danger => 2,
        }
    }

    /// RGBA fill used by the terrain columns and map markers.
    pub fn display_color(self) -> Rgba {
        match self {
            RiskCategory::Safe => Rgba([34, 197, 94, 200]),
            RiskCategory::Caution => Rgba([251, 191, 36, 200]),
            RiskCategory::Danger => Rgba([239, 68, 68, 200]),
        }
    }

    /// Machine-readable key.
    pub fn key(self) -> &'static str {
        match self {
            RiskCategory::Safe => "safe",
            RiskCategory::Caution => "caution",
            RiskCategory::Danger => "danger",
        }
    }

    /// Label shown to residents.
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Safe => "Seguro",
            RiskCategory::Caution => "Precaución",
            RiskCategory::Danger => "Peligro",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// `#rrggbb`, alpha dropped. Used by the 2D marker map.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Outcome of evaluating one zone under one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskResult {
    pub category: RiskCategory,
    pub risk_level: u8,
    /// Raw score the category was thresholded from. Informational only.
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Rejected simulation or view input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Value lies outside the documented inclusive range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// NaN or infinite input.
    NotFinite { field: &'static str },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{} = {} is outside [{}, {}]", field, value, min, max),
            ParameterError::NotFinite { field } => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Problems building a zone registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Zone at this position has a blank name.
    EmptyName { index: usize },
    /// Two zones share a name.
    DuplicateName(String),
    /// Vulnerability outside 1–5.
    VulnerabilityOutOfRange { zone: String, value: u8 },
    /// Elevation must be finite and strictly positive.
    InvalidElevation { zone: String, value: f64 },
    /// Latitude/longitude not finite or outside ±90 / ±180.
    InvalidCoordinates { zone: String },
    /// The zones file could not be read.
    Io { path: String, message: String },
    /// The zones file is not valid TOML for the expected layout.
    Parse { path: String, message: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyName { index } => write!(f, "Zone #{} has an empty name", index),
            RegistryError::DuplicateName(name) => write!(f, "Duplicate zone name: {}", name),
            RegistryError::VulnerabilityOutOfRange { zone, value } => write!(
                f,
                "Zone {}: vulnerability {} is outside {}-{}",
                zone, value, VULNERABILITY_RANGE.0, VULNERABILITY_RANGE.1
            ),
            RegistryError::InvalidElevation { zone, value } => {
                write!(f, "Zone {}: elevation {} must be a positive number", zone, value)
            }
            RegistryError::InvalidCoordinates { zone } => {
                write!(f, "Zone {}: coordinates are not valid WGS84", zone)
            }
            RegistryError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            RegistryError::Parse { path, message } => {
                write!(f, "Parse error in {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
