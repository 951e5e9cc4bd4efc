use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use airsight::{AirsightConfig, City, ForecastApiClient, ForecastController, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AirsightConfig::load().with_context(|| "Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let client = ForecastApiClient::new(&config)?;
    let controller = Arc::new(ForecastController::new(Arc::new(client)));

    // Warm the dashboard with the configured default city; the selector can
    // re-request any supported city afterwards.
    let default_city: City = config
        .defaults
        .city
        .parse()
        .with_context(|| "Invalid default city in configuration")?;
    drop(controller.request_forecast(default_city));

    web::run(config.defaults.port, controller).await;

    Ok(())
}
