//! Chart series assembly and dashboard view derivation
//!
//! Transforms a [`ForecastSeries`] into the aligned, chart-ready payload the
//! rendering collaborator consumes. Kept separate from the fetch step so
//! styling can be attached independently and the transformation stays
//! testable without network I/O.

use serde::{Deserialize, Serialize};

use crate::models::ForecastSeries;
use crate::risk::{self, RiskCategory};

/// Prediction line color (blue, matching the dashboard palette)
const PREDICTION_COLOR: &str = "#3b82f6";
/// Prediction area fill
const PREDICTION_FILL: &str = "rgba(59,130,246,0.15)";
/// Upper-bound line color
const UPPER_COLOR: &str = "#ef4444";
/// Lower-bound line color
const LOWER_COLOR: &str = "#22c55e";

/// Label-aligned numeric sequences ready for the chart collaborator.
///
/// All four sequences have equal length and preserve the input order of the
/// series (ascending `day`, as delivered by the forecast service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesSet {
    /// Axis labels, `"Day +{day}"` per point
    pub labels: Vec<String>,
    /// AQI point estimates
    pub prediction: Vec<f64>,
    /// Upper 90%-confidence bounds
    pub upper: Vec<f64>,
    /// Lower 90%-confidence bounds
    pub lower: Vec<f64>,
}

/// One styled line for the chart collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u8; 2]>,
    pub fill: bool,
}

/// Assemble the chart-ready series set from a forecast series.
///
/// Index-aligned with the input, order-preserving, deterministic. The
/// non-empty invariant is enforced at [`ForecastSeries::new`], so this can
/// never silently produce a zero-length chart set.
#[must_use]
pub fn assemble(series: &ForecastSeries) -> ChartSeriesSet {
    let points = series.points();

    ChartSeriesSet {
        labels: points.iter().map(|p| format!("Day +{}", p.day)).collect(),
        prediction: points.iter().map(|p| p.prediction).collect(),
        upper: points.iter().map(|p| p.upper).collect(),
        lower: points.iter().map(|p| p.lower).collect(),
    }
}

impl ChartSeriesSet {
    /// Number of forecast days in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Attach static styling, producing the three lines the chart draws:
    /// filled prediction, dashed upper bound, dashed lower bound.
    #[must_use]
    pub fn datasets(&self) -> Vec<ChartDataset> {
        vec![
            ChartDataset {
                label: "Predicted AQI".to_string(),
                data: self.prediction.clone(),
                border_color: PREDICTION_COLOR.to_string(),
                background_color: Some(PREDICTION_FILL.to_string()),
                border_dash: None,
                fill: true,
            },
            ChartDataset {
                label: "Upper Bound".to_string(),
                data: self.upper.clone(),
                border_color: UPPER_COLOR.to_string(),
                background_color: None,
                border_dash: Some([6, 6]),
                fill: false,
            },
            ChartDataset {
                label: "Lower Bound".to_string(),
                data: self.lower.clone(),
                border_color: LOWER_COLOR.to_string(),
                background_color: None,
                border_dash: Some([6, 6]),
                fill: false,
            },
        ]
    }
}

/// Headline card plus chart payload, derived in full from one series.
///
/// Recomputed on every successful fetch; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// City the view was built for
    pub city: String,
    /// Rounded AQI headline for the first forecast day
    pub headline_aqi: i64,
    /// Risk category label for the headline
    pub category: String,
    /// Display color token for the headline
    pub color: String,
    /// Health advisory for the headline category
    pub advisory: String,
    /// Rounded confidence range, e.g. `"90 – 150 (90% Confidence)"`
    pub confidence_range: String,
    /// Chart payload for the full series
    pub chart: ChartSeriesSet,
    /// Styled datasets for the chart collaborator
    pub datasets: Vec<ChartDataset>,
}

impl DashboardView {
    /// Derive the display view from a forecast series.
    ///
    /// Rounding happens here, for display only; classification runs on the
    /// raw prediction.
    #[must_use]
    pub fn from_series(series: &ForecastSeries) -> Self {
        let first = series.first();
        let category: RiskCategory = risk::classify(first.prediction);
        let chart = assemble(series);
        let datasets = chart.datasets();

        Self {
            city: series.city.to_string(),
            headline_aqi: first.prediction.round() as i64,
            category: category.to_string(),
            color: category.color().to_string(),
            advisory: category.advisory().to_string(),
            confidence_range: format!(
                "{} – {} (90% Confidence)",
                first.lower.round() as i64,
                first.upper.round() as i64
            ),
            chart,
            datasets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, ForecastPoint, ForecastSeries};

    fn sample_series(len: u32) -> ForecastSeries {
        let points = (1..=len)
            .map(|day| ForecastPoint {
                day,
                prediction: 100.0 + f64::from(day) * 10.0,
                lower: 80.0 + f64::from(day) * 10.0,
                upper: 130.0 + f64::from(day) * 10.0,
            })
            .collect();
        ForecastSeries::new(City::Delhi, points).unwrap()
    }

    #[test]
    fn test_assemble_alignment() {
        let series = sample_series(7);
        let chart = assemble(&series);

        assert_eq!(chart.len(), 7);
        assert_eq!(chart.labels.len(), 7);
        assert_eq!(chart.prediction.len(), 7);
        assert_eq!(chart.upper.len(), 7);
        assert_eq!(chart.lower.len(), 7);

        for (i, point) in series.points().iter().enumerate() {
            assert!(chart.labels[i].contains(&point.day.to_string()));
            assert_eq!(chart.prediction[i], point.prediction);
            assert_eq!(chart.upper[i], point.upper);
            assert_eq!(chart.lower[i], point.lower);
        }
    }

    #[test]
    fn test_assemble_labels() {
        let chart = assemble(&sample_series(3));
        assert_eq!(chart.labels, vec!["Day +1", "Day +2", "Day +3"]);
    }

    #[test]
    fn test_assemble_preserves_input_order() {
        // No sorting: the service is trusted to deliver ascending days,
        // and whatever order arrives is the order rendered.
        let points = vec![
            ForecastPoint {
                day: 3,
                prediction: 90.0,
                lower: 70.0,
                upper: 110.0,
            },
            ForecastPoint {
                day: 1,
                prediction: 120.0,
                lower: 95.0,
                upper: 140.0,
            },
        ];
        let series = ForecastSeries::new(City::Chennai, points).unwrap();
        let chart = assemble(&series);
        assert_eq!(chart.labels, vec!["Day +3", "Day +1"]);
        assert_eq!(chart.prediction, vec![90.0, 120.0]);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let series = sample_series(5);
        assert_eq!(assemble(&series), assemble(&series));
    }

    #[test]
    fn test_datasets_styling() {
        let datasets = assemble(&sample_series(2)).datasets();
        assert_eq!(datasets.len(), 3);

        let prediction = &datasets[0];
        assert_eq!(prediction.label, "Predicted AQI");
        assert!(prediction.fill);
        assert!(prediction.border_dash.is_none());

        let upper = &datasets[1];
        assert_eq!(upper.border_dash, Some([6, 6]));
        assert!(!upper.fill);
        assert_eq!(upper.data, vec![140.0, 150.0]);

        let lower = &datasets[2];
        assert_eq!(lower.border_dash, Some([6, 6]));
        assert_eq!(lower.data, vec![90.0, 100.0]);
    }

    #[test]
    fn test_dashboard_view_headline() {
        let points = vec![ForecastPoint {
            day: 1,
            prediction: 120.4,
            lower: 89.6,
            upper: 150.2,
        }];
        let series = ForecastSeries::new(City::Delhi, points).unwrap();
        let view = DashboardView::from_series(&series);

        assert_eq!(view.city, "Delhi");
        assert_eq!(view.headline_aqi, 120);
        assert_eq!(view.category, "Unhealthy for Sensitive Groups");
        assert_eq!(view.color, "#facc15");
        assert_eq!(view.confidence_range, "90 – 150 (90% Confidence)");
        assert_eq!(view.chart.len(), 1);
        assert_eq!(view.datasets.len(), 3);
    }

    #[test]
    fn test_dashboard_view_classifies_raw_prediction() {
        // 99.6 rounds to 100 for display but classifies as Moderate,
        // because classification runs on the raw value before rounding.
        let points = vec![ForecastPoint {
            day: 1,
            prediction: 99.6,
            lower: 80.0,
            upper: 120.0,
        }];
        let series = ForecastSeries::new(City::Mumbai, points).unwrap();
        let view = DashboardView::from_series(&series);
        assert_eq!(view.headline_aqi, 100);
        assert_eq!(view.category, "Moderate");
    }
}
