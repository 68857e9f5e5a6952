//! Shared application state holding the loaded model.

use weather_model::LocalPredictor;

/// Shared state for the prediction server.
///
/// The predictor wraps the artifact in an `Arc`, so cloning the state per
/// request is cheap and never copies the model.
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: LocalPredictor,
}

impl AppState {
    pub fn new(predictor: LocalPredictor) -> Self {
        Self { predictor }
    }
}
