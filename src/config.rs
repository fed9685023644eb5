//! Service configuration.
//!
//! Settings come from an optional `floodzone.toml`, with every field
//! defaulted so a partial file (or none at all) is valid:
//!
//! ```toml
//! [simulation]
//! rainfall_mm = 30.0
//! duration_hours = 3.0
//! river_level_m = 3.5
//!
//! [view]
//! pitch = 50.0
//! bearing = -20.0
//! zoom = 11.0
//!
//! [registry]
//! zones_file = "zones/asuncion.toml"
//!
//! [logging]
//! level = "info"
//! file = "floodzone.log"
//! timestamps = false
//! ```
//!
//! File locations may also be given through `FLOODZONE_CONFIG` and
//! `FLOODZONE_ZONES`, read from the environment or a `.env` file.
//!
//! Precedence is command-line flag, then environment variable, then config
//! file, then built-in default. A relative `zones_file` is resolved against
//! the directory of the config file that names it; flag and environment
//! paths stay relative to the working directory.

use crate::logging::LogLevel;
use crate::model::{ParameterError, SimulationParameters, ViewParameters};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FLOODZONE_CONFIG";
/// Environment variable naming the zones file.
pub const ZONES_ENV: &str = "FLOODZONE_ZONES";
/// Config file looked up in the working directory when nothing else is set.
pub const DEFAULT_CONFIG_FILE: &str = "floodzone.toml";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub simulation: SimulationSection,
    pub view: ViewSection,
    pub registry: RegistrySection,
    pub logging: LoggingSection,
    /// Directory of the file this config was read from.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub rainfall_mm: f64,
    pub duration_hours: f64,
    pub river_level_m: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let defaults = SimulationParameters::default();
        Self {
            rainfall_mm: defaults.rainfall_mm(),
            duration_hours: defaults.duration_hours(),
            river_level_m: defaults.river_level_m(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSection {
    pub pitch: f64,
    pub bearing: f64,
    pub zoom: f64,
    pub center_latitude: f64,
    pub center_longitude: f64,
}

impl Default for ViewSection {
    fn default() -> Self {
        let defaults = ViewParameters::default();
        Self {
            pitch: defaults.pitch,
            bearing: defaults.bearing,
            zoom: defaults.zoom,
            center_latitude: defaults.center_latitude,
            center_longitude: defaults.center_longitude,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySection {
    /// TOML file with `[[zone]]` tables. Built-in city when absent.
    pub zones_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            ConfigError::Parse { path, message } => {
                write!(f, "Parse error in {}: {}", path, message)
            }
            ConfigError::InvalidLogLevel(msg) => write!(f, "Invalid logging.level: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ServiceConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Validated simulation parameters from the `[simulation]` section.
    pub fn simulation_parameters(&self) -> Result<SimulationParameters, ParameterError> {
        self.simulation_parameters_with(None, None, None)
    }

    /// Like [`simulation_parameters`](Self::simulation_parameters), with
    /// each `Some` override taking the place of the configured value. The
    /// merged result is validated as a whole.
    pub fn simulation_parameters_with(
        &self,
        rainfall_mm: Option<f64>,
        duration_hours: Option<f64>,
        river_level_m: Option<f64>,
    ) -> Result<SimulationParameters, ParameterError> {
        SimulationParameters::new(
            rainfall_mm.unwrap_or(self.simulation.rainfall_mm),
            duration_hours.unwrap_or(self.simulation.duration_hours),
            river_level_m.unwrap_or(self.simulation.river_level_m),
        )
    }

    /// Validated camera from the `[view]` section.
    pub fn view_parameters(&self) -> Result<ViewParameters, ParameterError> {
        self.view_parameters_with(None, None, None)
    }

    /// Camera with optional overrides. The centre always comes from config.
    pub fn view_parameters_with(
        &self,
        pitch: Option<f64>,
        bearing: Option<f64>,
        zoom: Option<f64>,
    ) -> Result<ViewParameters, ParameterError> {
        let view = ViewParameters::new(
            pitch.unwrap_or(self.view.pitch),
            bearing.unwrap_or(self.view.bearing),
            zoom.unwrap_or(self.view.zoom),
        )?;
        Ok(view.centered_on(self.view.center_latitude, self.view.center_longitude))
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.log_level_with(None)
    }

    /// Log level, with an optional override in the same `debug`/`info`/...
    /// syntax as the config file.
    pub fn log_level_with(&self, level: Option<&str>) -> Result<LogLevel, ConfigError> {
        level
            .unwrap_or(self.logging.level.as_str())
            .parse()
            .map_err(ConfigError::InvalidLogLevel)
    }

    /// The `[registry] zones_file`, joined onto the config file's directory
    /// when relative.
    pub fn zones_file_path(&self) -> Option<PathBuf> {
        let file = PathBuf::from(self.registry.zones_file.as_ref()?);
        match &self.base_dir {
            Some(dir) if file.is_relative() => Some(dir.join(file)),
            _ => Some(file),
        }
    }

    /// Directory relative `zones_file` entries resolve against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

/// Reads a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig, ConfigError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: origin.clone(),
        message: e.to_string(),
    })?;
    let mut config = ServiceConfig::from_toml_str(&text, &origin)?;
    config.base_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf);
    Ok(config)
}

/// Picks the config file: explicit path, then `FLOODZONE_CONFIG`, then
/// `floodzone.toml` if it exists. `None` means run on defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    choose_config_path(explicit, env::var(CONFIG_ENV).ok())
}

/// Picks the zones file: explicit path, then `FLOODZONE_ZONES`, then the
/// config's `[registry] zones_file`. `None` means the built-in city.
pub fn resolve_zones_path(explicit: Option<&Path>, config: &ServiceConfig) -> Option<PathBuf> {
    choose_zones_path(explicit, env::var(ZONES_ENV).ok(), config)
}

/// [`resolve_config_path`] with the environment value passed in.
pub fn choose_config_path(explicit: Option<&Path>, env_value: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_value.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

/// [`resolve_zones_path`] with the environment value passed in.
pub fn choose_zones_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    config: &ServiceConfig,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_value.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    config.zones_file_path()
}

/// Loads `.env` into the process environment if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}
