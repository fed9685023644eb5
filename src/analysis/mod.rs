/// Data organization for the dashboard panels.
///
/// Scoring itself lives in `alert::thresholds`; this module only joins
/// zones with their results and derives the aggregates the views read.
///
/// Submodules:
/// - `groupings` — per-zone assessment, counts, sorted views, water areas.

pub mod groupings;

pub use groupings::{Assessment, CategoryCounts, WaterArea, ZoneAssessment, assess};
