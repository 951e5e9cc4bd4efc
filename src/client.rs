//! HTTP client for the external forecast service
//!
//! The service exposes `GET /forecast7/{city}` returning a JSON array of
//! per-day predictions with 90%-confidence bounds. The payload is treated as
//! untrusted: it is deserialized into wire structs and converted into the
//! typed model at this boundary, so nothing loosely-shaped travels further
//! into classification or assembly. Failures are not retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::config::AirsightConfig;
use crate::models::{City, ForecastPoint, ForecastSeries};
use crate::{AirsightError, Result};

/// One forecast day as the service serializes it
#[derive(Debug, Deserialize)]
struct WireForecastPoint {
    day: u32,
    prediction: f64,
    lower: f64,
    upper: f64,
}

impl From<WireForecastPoint> for ForecastPoint {
    fn from(wire: WireForecastPoint) -> Self {
        ForecastPoint {
            day: wire.day,
            prediction: wire.prediction,
            lower: wire.lower,
            upper: wire.upper,
        }
    }
}

/// Source of forecast series, implemented by the HTTP client and by test
/// doubles in controller tests.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the multi-day forecast for a city
    async fn fetch_forecast(&self, city: City) -> Result<ForecastSeries>;
}

/// HTTP client for the forecast service
pub struct ForecastApiClient {
    /// Underlying HTTP client, carries the configured timeout
    client: Client,
    /// Base URL of the forecast service
    base_url: String,
}

impl ForecastApiClient {
    /// Create a new client from configuration
    pub fn new(config: &AirsightConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.forecast.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("Airsight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AirsightError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.forecast.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client pointed at an explicit base URL with a short timeout.
    /// Used by tests against in-process mock services.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(concat!("Airsight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AirsightError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ForecastProvider for ForecastApiClient {
    /// Fetch the 7-day forecast for a city from the forecast service.
    ///
    /// Any non-2xx status or transport error is an API fault; the payload is
    /// validated and converted into a [`ForecastSeries`] before returning.
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch_forecast(&self, city: City) -> Result<ForecastSeries> {
        let url = format!("{}/forecast7/{}", self.base_url, city);
        debug!("Forecast request URL: {}", url);

        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Network error fetching forecast for {}: {}", city, e);
            AirsightError::api(format!("Network error fetching forecast for {city}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Forecast request for {} failed with status {}", city, status);
            return Err(AirsightError::api(format!(
                "Forecast request for {city} failed with status: {status}"
            )));
        }

        let wire_points: Vec<WireForecastPoint> = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response for {}: {}", city, e);
            AirsightError::api(format!("Invalid forecast data received for {city}: {e}"))
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved {} forecast points for {} in {:.3}s",
            wire_points.len(),
            city,
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast service response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        let points: Vec<ForecastPoint> = wire_points.into_iter().map(Into::into).collect();

        // Empty payloads fail here, before any chart set could be derived.
        ForecastSeries::new(city, points)
    }
}
