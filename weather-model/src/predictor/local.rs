use anyhow::Context;
use async_trait::async_trait;
use std::{path::Path, sync::Arc};

use crate::{
    FeatureRecord,
    artifact::ModelArtifact,
    error::{PredictError, Result},
    model::round2,
};

use super::Predictor;

/// Predicts in-process with a loaded [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct LocalPredictor {
    artifact: Arc<ModelArtifact>,
}

impl LocalPredictor {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact: Arc::new(artifact) }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let artifact = ModelArtifact::load(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;
        Ok(Self::new(artifact))
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Static description returned alongside every successful prediction.
    pub fn model_info(&self) -> &str {
        self.artifact.description()
    }

    /// Always `true`: a `LocalPredictor` can only be built from an artifact
    /// that already loaded and validated, and it is never unloaded.
    pub fn is_loaded(&self) -> bool {
        true
    }
}

#[async_trait]
impl Predictor for LocalPredictor {
    async fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        let values = self.artifact.predict(&[record.to_row()])?;
        values
            .first()
            .copied()
            .map(round2)
            .ok_or(PredictError::ShapeMismatch { expected: 1, got: 0 })
    }

    async fn predict_batch(&self, records: &[FeatureRecord]) -> Result<Vec<f64>> {
        let rows: Vec<_> = records.iter().map(FeatureRecord::to_row).collect();
        let values = self.artifact.predict(&rows)?;
        Ok(values.into_iter().map(round2).collect())
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.artifact.name(), self.artifact.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::linear_artifact;

    fn record(lag1: f64, month: i64, dayofyear: i64) -> FeatureRecord {
        FeatureRecord { lag1, lag3: 5.2, lag7: 4.8, roll7: 5.0, month, dayofyear }
    }


    #[tokio::test]
    async fn single_prediction_is_rounded() {
        let predictor = LocalPredictor::new(linear_artifact());
        let value = predictor.predict(&record(5.0, 1, 15)).await.unwrap();

        // 10 + (4 + 4.2 + 3.8 + 4 + 0 + 14) / 2
        assert_eq!(value, 25.0);
        // 10 + 30.013 / 2 = 25.0065
        assert_eq!(predictor.predict(&record(5.013, 1, 15)).await.unwrap(), 25.01);
    }

    #[tokio::test]
    async fn batch_matches_single_predictions_in_order() {
        let predictor = LocalPredictor::new(linear_artifact());
        let records = vec![record(5.0, 1, 15), record(-3.337, 12, 350), record(21.4, 7, 190)];

        let batch = predictor.predict_batch(&records).await.unwrap();
        assert_eq!(batch.len(), records.len());

        for (record, value) in records.iter().zip(&batch) {
            assert_eq!(predictor.predict(record).await.unwrap(), *value);
        }
    }

    #[tokio::test]
    async fn empty_batch_succeeds() {
        let predictor = LocalPredictor::new(linear_artifact());
        assert!(predictor.predict_batch(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overflow_surfaces_as_error() {
        let predictor = LocalPredictor::new(linear_artifact());
        // One huge lag alone stays finite after scaling.
        assert!(predictor.predict(&record(f64::MAX, 1, 1)).await.is_ok());

        let huge = FeatureRecord {
            lag1: f64::MAX,
            lag3: f64::MAX,
            lag7: f64::MAX,
            roll7: f64::MAX,
            month: 1,
            dayofyear: 1,
        };
        let err = predictor.predict_batch(&[record(1.0, 1, 1), huge]).await.unwrap_err();
        assert_eq!(err.kind(), "non_finite");
    }

    #[test]
    fn reports_loaded_model() {
        let predictor = LocalPredictor::new(linear_artifact());
        assert!(predictor.is_loaded());
        assert_eq!(predictor.model_info(), "Linear test model");
        assert_eq!(predictor.describe(), "test-linear (linear)");
    }
}
