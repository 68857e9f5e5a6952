//! Prediction endpoints.
//!
//! Failures after the JSON body has been accepted are reported in the
//! payload with HTTP 200. Malformed bodies never reach these handlers; the
//! `Json` extractor rejects them first.

use axum::{Json, extract::State};
use weather_model::{
    BatchRequest, BatchResponse, FeatureRecord, PredictError, PredictResponse, Predictor,
};

use crate::state::AppState;

pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<FeatureRecord>,
) -> Json<PredictResponse> {
    let res = match state.predictor.predict(&record).await {
        Ok(value) => PredictResponse::success(value, state.predictor.model_info()),
        Err(e) => {
            log_failure("predict", &e);
            PredictResponse::failure(e)
        }
    };

    Json(res)
}

pub async fn batch_predict(
    State(state): State<AppState>,
    Json(batch): Json<BatchRequest>,
) -> Json<BatchResponse> {
    tracing::debug!(rows = batch.data.len(), "batch prediction");

    let res = match state.predictor.predict_batch(&batch.data).await {
        Ok(values) => BatchResponse::success(values),
        Err(e) => {
            log_failure("batch_predict", &e);
            BatchResponse::failure(e)
        }
    };

    Json(res)
}

fn log_failure(operation: &str, err: &PredictError) {
    tracing::warn!(operation, kind = err.kind(), error = %err, "prediction failed");
}
