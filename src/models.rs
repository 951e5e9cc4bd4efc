//! Domain models for the `Airsight` dashboard core
//!
//! Everything the forecast service hands us crosses this boundary exactly
//! once: wire structs live in `client`, the typed model lives here. A
//! `ForecastSeries` can only be built through [`ForecastSeries::new`], so the
//! non-empty invariant holds everywhere downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::AirsightError;

/// The closed set of cities the forecast service supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Delhi,
    Mumbai,
    Chennai,
    Hyderabad,
    Bangalore,
}

impl City {
    /// All supported cities, in selector order
    pub const ALL: [City; 5] = [
        City::Delhi,
        City::Mumbai,
        City::Chennai,
        City::Hyderabad,
        City::Bangalore,
    ];

    /// Exact path segment used by the forecast service (case-sensitive)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Chennai => "Chennai",
            City::Hyderabad => "Hyderabad",
            City::Bangalore => "Bangalore",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = AirsightError;

    /// Case-sensitive, matching the wire contract; anything else is an
    /// `UnknownCity` fault rather than a guess.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .find(|city| city.as_str() == s)
            .copied()
            .ok_or_else(|| AirsightError::unknown_city(s))
    }
}

/// One predicted day of air quality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Day offset from today (1 = tomorrow), strictly increasing by index
    pub day: u32,
    /// AQI point estimate
    pub prediction: f64,
    /// Lower 90%-confidence bound
    pub lower: f64,
    /// Upper 90%-confidence bound
    pub upper: f64,
}

impl ForecastPoint {
    /// Check the upstream data-quality invariant `lower <= prediction <= upper`
    #[must_use]
    pub fn has_valid_bounds(&self) -> bool {
        self.lower <= self.prediction && self.prediction <= self.upper
    }
}

/// An ordered, non-empty forecast series produced atomically by one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// City this series was requested for
    pub city: City,
    /// Forecast points, ascending by `day`
    points: Vec<ForecastPoint>,
    /// When this series was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl ForecastSeries {
    /// Build a series from raw points, rejecting the empty case.
    ///
    /// Malformed bounds (`lower > prediction` or `prediction > upper`) are
    /// upstream data-quality faults: logged as warnings and kept, so the
    /// dashboard still renders on bad data instead of going blank.
    pub fn new(city: City, points: Vec<ForecastPoint>) -> crate::Result<Self> {
        if points.is_empty() {
            return Err(AirsightError::EmptySeries);
        }

        for point in &points {
            if !point.has_valid_bounds() {
                warn!(
                    city = %city,
                    day = point.day,
                    prediction = point.prediction,
                    lower = point.lower,
                    upper = point.upper,
                    "forecast point violates lower <= prediction <= upper"
                );
            }
        }

        Ok(Self {
            city,
            points,
            retrieved_at: Utc::now(),
        })
    }

    /// The forecast points, guaranteed non-empty
    #[must_use]
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// First point of the series (the "tomorrow" headline)
    #[must_use]
    pub fn first(&self) -> &ForecastPoint {
        // Invariant: `new` rejects empty input.
        &self.points[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Request lifecycle state, owned exclusively by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState {
    /// No request issued yet
    Idle,
    /// A request is in flight
    Loading { city: City },
    /// Last request succeeded; holds the current series
    Success(ForecastSeries),
    /// Last request failed; carries a user-visible message
    Error { message: String },
}

impl RequestState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    /// Current series, if the last request succeeded
    #[must_use]
    pub fn series(&self) -> Option<&ForecastSeries> {
        match self {
            RequestState::Success(series) => Some(series),
            _ => None,
        }
    }
}
