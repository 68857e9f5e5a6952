use async_trait::async_trait;
use reqwest::Client;

use crate::{
    FeatureRecord,
    error::{PredictError, Result},
    model::{BatchRequest, BatchResponse, PredictResponse},
};

use super::Predictor;

/// Asks a running prediction service over HTTP.
#[derive(Debug, Clone)]
pub struct RemotePredictor {
    base_url: String,
    http: Client,
}

impl RemotePredictor {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Predictor for RemotePredictor {
    async fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        let url = format!("{}/predict", self.base_url);

        let res: PredictResponse = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match res {
            PredictResponse::Success { predicted_temperature, .. } => Ok(predicted_temperature),
            PredictResponse::Error { error, .. } => Err(PredictError::Remote { message: error }),
        }
    }

    async fn predict_batch(&self, records: &[FeatureRecord]) -> Result<Vec<f64>> {
        let url = format!("{}/batch_predict", self.base_url);
        let body = BatchRequest { data: records.to_vec() };

        let res: BatchResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match res {
            BatchResponse::Success { predicted_temperatures, .. } => Ok(predicted_temperatures),
            BatchResponse::Error { error, .. } => Err(PredictError::Remote { message: error }),
        }
    }

    fn describe(&self) -> String {
        format!("remote service at {}", self.base_url)
    }
}
