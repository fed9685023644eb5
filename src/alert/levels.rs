//! City-wide alert level and the recommended actions that go with it.
//!
//! The level is driven by the worst zone: any Danger zone raises a red
//! alert, otherwise any Caution zone raises a yellow one.

use crate::model::RiskCategory;
use serde::Serialize;
use std::fmt;

/// Overall alert, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Yellow,
    Red,
}

impl AlertLevel {
    /// Picks the level from the worst category present. `None` (no zones)
    /// is Normal.
    pub fn from_worst(worst: Option<RiskCategory>) -> Self {
        match worst {
            Some(RiskCategory::Danger) => AlertLevel::Red,
            Some(RiskCategory::Caution) => AlertLevel::Yellow,
            Some(RiskCategory::Safe) | None => AlertLevel::Normal,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            AlertLevel::Red => "ALERTA ROJA",
            AlertLevel::Yellow => "ALERTA AMARILLA",
            AlertLevel::Normal => "SITUACIÓN NORMAL",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// One recommended action for the public.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: &'static str,
    pub detail: String,
}

/// Recommended actions for `level`.
///
/// `danger_zones` names the zones at Danger and is only used for the red
/// level. `safe_routes` lists zones suggested as detours (typically the
/// highest-ground Safe zones); when empty the route advice stays generic.
pub fn recommendations(
    level: AlertLevel,
    danger_zones: &[&str],
    safe_routes: &[&str],
) -> Vec<Recommendation> {
    match level {
        AlertLevel::Red => {
            let route = if safe_routes.is_empty() {
                "Use rutas por zonas altas".to_string()
            } else {
                format!("Desvío por {}", safe_routes.join(", "))
            };
            vec![
                Recommendation {
                    action: "Evitar",
                    detail: format!("No transitar por zonas rojas: {}", danger_zones.join(", ")),
                },
                Recommendation {
                    action: "Ruta alternativa",
                    detail: route,
                },
                Recommendation {
                    action: "Emergencia",
                    detail: "Activar notificaciones de emergencia".to_string(),
                },
                Recommendation {
                    action: "Evacuación",
                    detail: format!("Preparar evacuación de {}", danger_zones.join(", ")),
                },
            ]
        }
        AlertLevel::Yellow => vec![
            Recommendation {
                action: "Monitorear",
                detail: "Vigilar el nivel del río".to_string(),
            },
            Recommendation {
                action: "Rutas",
                detail: "Preparar rutas alternativas".to_string(),
            },
            Recommendation {
                action: "Atención",
                detail: "Atentos a actualizaciones del clima".to_string(),
            },
        ],
        AlertLevel::Normal => vec![
            Recommendation {
                action: "Normal",
                detail: "Sin riesgo de inundación".to_string(),
            },
            Recommendation {
                action: "Tráfico",
                detail: "Tráfico normal en todas las zonas".to_string(),
            },
        ],
    }
}
