//! Dashboard summary types.

use serde::Serialize;

/// Minutes of history the flame alert banner considers.
pub const FLAME_ALERT_WINDOW_MINUTES: i64 = 30;

/// Pollution banding applied to the latest air reading on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirBand {
    Normal,
    Moderate,
    High,
}

impl AirBand {
    /// Sensor-specific thresholds carried over from the deployed monitor.
    pub fn for_value(value: f64) -> Self {
        if value >= 300.0 {
            AirBand::High
        } else if value >= 150.0 {
            AirBand::Moderate
        } else {
            AirBand::Normal
        }
    }
}

/// Latest air reading shown in the dashboard value card.
#[derive(Debug, Clone, Serialize)]
pub struct LatestAir {
    pub value: String,
    pub recorded_at: String,
    pub band: AirBand,
}

/// Data backing the rendered dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub latest_air: Option<LatestAir>,
    /// True if any fire-detected event landed within the alert window.
    pub flame_recent: bool,
}
