//! JSON/HTTP front end.
//!
//! `GET /` usage, `GET /health` liveness, `POST /weather {"city": ...}` lookup.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use weather_core::{
    Config, WeatherApiProvider, WeatherError, WeatherProvider, provider_from_config,
};

/// Body of `POST /weather`.
#[derive(Debug, Deserialize)]
pub struct CityRequest {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub message: &'static str,
    pub usage: &'static str,
}

/// Shared handler state: only the provider, which is immutable.
#[derive(Clone)]
pub struct RestState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Build the router. Split out of [`serve`] so tests can drive it with `oneshot`.
pub fn router(provider: Arc<dyn WeatherProvider>) -> Router {
    Router::new()
        .route("/", get(usage_handler))
        .route("/health", get(health_handler))
        .route("/weather", post(weather_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(RestState { provider })
}

/// Provider for the REST server.
///
/// Unlike the gRPC server this starts without an API key; each lookup then
/// fails at the provider and surfaces as 503.
pub fn provider_for(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    if config.api_key().is_some() {
        return provider_from_config(config);
    }

    tracing::warn!("WEATHER_API_KEY not configured; weather requests will fail until it is set");
    let provider = WeatherApiProvider::new("", &config.provider_url, config.timeout())?;
    Ok(Arc::new(provider))
}

/// Bind `config.rest_addr` and serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app = router(provider_for(config)?);

    let listener = TcpListener::bind(&config.rest_addr).await?;
    tracing::info!("REST weather API listening on {}", config.rest_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("REST weather API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down server...");
}

async fn usage_handler() -> Json<UsageResponse> {
    Json(UsageResponse {
        message: "Welcome to Simple Weather API",
        usage: "POST /weather with {\"city\": \"city_name\"}",
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "weather-api",
    })
}

async fn weather_handler(
    State(state): State<RestState>,
    body: Result<Json<CityRequest>, JsonRejection>,
) -> Response {
    let city = match body {
        Ok(Json(CityRequest { city: Some(city) })) if !city.trim().is_empty() => city,
        Ok(_) => return error_response(&WeatherError::InvalidInput),
        Err(rejection) => {
            tracing::debug!("rejected /weather body: {rejection}");
            return error_response(&WeatherError::InvalidInput);
        }
    };

    tracing::info!(city = city.trim(), "received weather request");

    match weather_core::lookup(state.provider.as_ref(), &city).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// HTTP status and message for each lookup failure.
pub fn error_status(err: &WeatherError) -> (StatusCode, String) {
    match err {
        WeatherError::InvalidInput => (StatusCode::BAD_REQUEST, "City name is required".into()),
        WeatherError::NotFound(_) => (StatusCode::NOT_FOUND, "City not found".into()),
        WeatherError::Unavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Weather service unavailable".into())
        }
        WeatherError::Timeout | WeatherError::Connection(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Failed to fetch weather data".into())
        }
        WeatherError::MalformedResponse(detail) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid response format: {detail}"),
        ),
        WeatherError::Internal(detail) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {detail}"))
        }
    }
}

fn error_response(err: &WeatherError) -> Response {
    let (status, error) = error_status(err);
    (status, Json(ErrorBody { error })).into_response()
}
