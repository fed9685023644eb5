//! Flood-zone risk service.
//!
//! Scores a fixed set of city neighborhoods against rainfall and river
//! conditions and produces the per-zone result set consumed by the terrain
//! view, the marker map and the analytics panel.
//!
//! ```no_run
//! use floodzone_service::{analysis, model::SimulationParameters, zones::ZoneRegistry};
//!
//! let params = SimulationParameters::new(60.0, 2.0, 5.0)?;
//! let assessment = analysis::assess(&ZoneRegistry::default_city(), &params);
//! println!("{} zones at danger", assessment.danger_zone_names().len());
//! # Ok::<(), floodzone_service::model::ParameterError>(())
//! ```

pub mod alert;
pub mod analysis;
pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod scene;
pub mod zones;
