//! Thin read-side over the controller state
//!
//! Exposes the request state and the derived dashboard view as JSON so a
//! frontend can poll it. The visual rendering itself is out of scope; this
//! is only the seam it reads from.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::chart::DashboardView;
use crate::controller::ForecastController;
use crate::models::{City, RequestState};

pub fn router(controller: Arc<ForecastController>) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/forecast/{city}", post(trigger_forecast))
        .with_state(controller)
}

async fn get_state(State(controller): State<Arc<ForecastController>>) -> Json<RequestState> {
    Json(controller.state())
}

async fn get_dashboard(
    State(controller): State<Arc<ForecastController>>,
) -> Result<Json<DashboardView>, StatusCode> {
    controller.dashboard().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn trigger_forecast(
    State(controller): State<Arc<ForecastController>>,
    Path(city): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let city: City = city
        .parse()
        .map_err(|e: crate::AirsightError| (StatusCode::BAD_REQUEST, e.user_message()))?;

    drop(controller.request_forecast(city));
    Ok(StatusCode::ACCEPTED)
}

pub async fn run(port: u16, controller: Arc<ForecastController>) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(controller).layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Dashboard API running at http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
