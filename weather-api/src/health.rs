//! Informational and health check endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Weather Temperature Prediction API";

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub model_loaded: bool,
}

pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Weather Prediction API is running",
        version: env!("CARGO_PKG_VERSION"),
        status: "healthy",
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        model_loaded: state.predictor.is_loaded(),
    })
}
