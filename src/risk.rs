//! AQI risk classification and health-risk scoring
//!
//! Pure functions over the AQI scale: category and display color come from a
//! single ordered threshold table, so the two can never disagree. Everything
//! here is stateless and safe to call from any thread.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AQI value above which the normalized risk score saturates at 1.0
const MAX_AQI: f64 = 500.0;

/// Ordered severity buckets with inclusive upper AQI bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// AQI <= 50
    Good,
    /// AQI <= 100
    Moderate,
    /// AQI <= 200
    UnhealthyForSensitiveGroups,
    /// AQI <= 300
    Poor,
    /// AQI <= 400
    VeryPoor,
    /// AQI > 400
    Severe,
}

/// The single threshold table: inclusive upper bound per category, ascending.
/// `Severe` is unbounded above and handled as the fallthrough.
const THRESHOLDS: [(f64, RiskCategory); 5] = [
    (50.0, RiskCategory::Good),
    (100.0, RiskCategory::Moderate),
    (200.0, RiskCategory::UnhealthyForSensitiveGroups),
    (300.0, RiskCategory::Poor),
    (400.0, RiskCategory::VeryPoor),
];

/// Classify an AQI value into its risk category.
///
/// Total over the real line: thresholds are evaluated in ascending order and
/// the first match wins, so values below zero fall into `Good`. That is a
/// documented policy (the upstream regressor may undershoot near zero), not
/// an oversight.
#[must_use]
pub fn classify(aqi: f64) -> RiskCategory {
    for (bound, category) in THRESHOLDS {
        if aqi <= bound {
            return category;
        }
    }
    RiskCategory::Severe
}

/// Normalized risk score in [0, 1]: AQI over the 500-point scale, capped.
#[must_use]
pub fn risk_score(aqi: f64) -> f64 {
    (aqi / MAX_AQI).clamp(0.0, 1.0)
}

/// Population groups with elevated sensitivity to air pollution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityGroup {
    General,
    Children,
    Elderly,
    Asthma,
}

impl SensitivityGroup {
    /// Multiplier applied to the base risk score
    #[must_use]
    pub fn weight(&self) -> f64 {
        match self {
            SensitivityGroup::General => 1.0,
            SensitivityGroup::Children => 1.2,
            SensitivityGroup::Elderly => 1.3,
            SensitivityGroup::Asthma => 1.5,
        }
    }
}

/// Risk score weighted for a sensitive population group, capped at 1.0.
#[must_use]
pub fn population_adjusted_risk(aqi: f64, group: SensitivityGroup) -> f64 {
    (risk_score(aqi) * group.weight()).min(1.0)
}

impl RiskCategory {
    /// Display color token (hex) for this category
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Good => "#22c55e",
            RiskCategory::Moderate => "#84cc16",
            RiskCategory::UnhealthyForSensitiveGroups => "#facc15",
            RiskCategory::Poor => "#f97316",
            RiskCategory::VeryPoor => "#ef4444",
            RiskCategory::Severe => "#7f1d1d",
        }
    }

    /// Health advisory text for this category
    #[must_use]
    pub fn advisory(&self) -> &'static str {
        match self {
            RiskCategory::Good => {
                "Air quality is satisfactory. Normal outdoor activity is safe."
            }
            RiskCategory::Moderate => {
                "Sensitive individuals should consider reducing prolonged outdoor exertion."
            }
            RiskCategory::UnhealthyForSensitiveGroups => {
                "Children, elderly, and respiratory patients should limit outdoor exposure."
            }
            RiskCategory::Poor => "Reduce outdoor activity. Consider wearing masks.",
            RiskCategory::VeryPoor => "Avoid outdoor exposure. Use air purification indoors.",
            RiskCategory::Severe => "Stay indoors. Health alert issued for all populations.",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategory::Good => "Good",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            RiskCategory::Poor => "Poor",
            RiskCategory::VeryPoor => "Very Poor",
            RiskCategory::Severe => "Severe",
        };
        f.write_str(label)
    }
}
