//! End-to-end tests against an in-process mock forecast service

use std::sync::Arc;

use axum::{Router, extract::Path, http::StatusCode, response::Json, routing::get};
use serde_json::{Value, json};

use airsight::{
    AirsightError, City, ForecastApiClient, ForecastController, ForecastProvider, RequestState,
};

/// Seven forecast days for Delhi, first point at AQI 120
fn delhi_payload() -> Value {
    let days: Vec<Value> = (1..=7)
        .map(|day| {
            json!({
                "day": day,
                "prediction": 120.0 + f64::from(day - 1) * 5.0,
                "lower": 90.0 + f64::from(day - 1) * 5.0,
                "upper": 150.0 + f64::from(day - 1) * 5.0,
            })
        })
        .collect();
    Value::Array(days)
}

/// Mock forecast service: Delhi succeeds, Chennai returns an empty array,
/// everything else fails with HTTP 500.
async fn forecast7(Path(city): Path<String>) -> (StatusCode, Json<Value>) {
    match city.as_str() {
        "Delhi" => (StatusCode::OK, Json(delhi_payload())),
        "Chennai" => (StatusCode::OK, Json(json!([]))),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "model unavailable"})),
        ),
    }
}

/// Bind the mock service to an ephemeral port and return its base URL
async fn spawn_mock_service() -> String {
    let app = Router::new().route("/forecast7/{city}", get(forecast7));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_client_fetches_and_types_the_payload() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();

    let series = client.fetch_forecast(City::Delhi).await.unwrap();

    assert_eq!(series.city, City::Delhi);
    assert_eq!(series.len(), 7);
    assert_eq!(series.first().day, 1);
    assert_eq!(series.first().prediction, 120.0);
    assert!(series.points().iter().all(|p| p.has_valid_bounds()));
}

#[tokio::test]
async fn test_client_surfaces_http_failure() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();

    let err = client.fetch_forecast(City::Mumbai).await.unwrap_err();
    assert!(matches!(err, AirsightError::Api { .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_client_rejects_empty_payload() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();

    let err = client.fetch_forecast(City::Chennai).await.unwrap_err();
    assert!(matches!(err, AirsightError::EmptySeries));
}

#[tokio::test]
async fn test_controller_success_lifecycle_over_http() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();
    let controller = ForecastController::new(Arc::new(client));

    assert_eq!(controller.state(), RequestState::Idle);

    let handle = controller.request_forecast(City::Delhi);
    assert!(controller.state().is_loading());
    handle.await.unwrap();

    let view = controller.dashboard().expect("expected a dashboard view");
    assert_eq!(view.chart.prediction[0], 120.0);
    assert_eq!(view.category, "Unhealthy for Sensitive Groups");
    assert_eq!(view.color, "#facc15");
    assert_eq!(view.chart.labels[0], "Day +1");
    assert_eq!(view.chart.len(), 7);
}

#[tokio::test]
async fn test_controller_error_lifecycle_over_http() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();
    let controller = ForecastController::new(Arc::new(client));

    let handle = controller.request_forecast(City::Mumbai);
    assert!(controller.state().is_loading());
    handle.await.unwrap();

    match controller.state() {
        RequestState::Error { message } => assert!(!message.is_empty()),
        other => panic!("expected Error state, got {other:?}"),
    }
    assert!(controller.dashboard().is_none());
}

#[tokio::test]
async fn test_error_then_success_recovers() {
    let base_url = spawn_mock_service().await;
    let client = ForecastApiClient::with_base_url(base_url).unwrap();
    let controller = ForecastController::new(Arc::new(client));

    controller.request_forecast(City::Mumbai).await.unwrap();
    assert!(matches!(controller.state(), RequestState::Error { .. }));

    controller.request_forecast(City::Delhi).await.unwrap();
    assert_eq!(controller.state().series().unwrap().city, City::Delhi);
}
