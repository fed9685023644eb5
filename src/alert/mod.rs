/// Risk scoring and alerting.
///
/// Submodules:
/// - `thresholds` — the per-zone score and its Safe / Caution / Danger cut-offs.
/// - `levels` — city-wide alert level and recommended actions.

pub mod levels;
pub mod thresholds;

pub use levels::{AlertLevel, Recommendation};
pub use thresholds::{classify_score, evaluate, evaluate_zone, risk_score};
