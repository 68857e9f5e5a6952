use async_trait::async_trait;
use std::fmt::Debug;

use crate::{FeatureRecord, error::Result};

pub mod local;
pub mod remote;

/// Something that turns feature records into rounded temperature
/// predictions.
#[async_trait]
pub trait Predictor: Send + Sync + Debug {
    /// Predict one record, rounded to two decimals.
    async fn predict(&self, record: &FeatureRecord) -> Result<f64>;

    /// Predict all records in one call. The output has the same length and
    /// order as `records`; each value is rounded independently.
    async fn predict_batch(&self, records: &[FeatureRecord]) -> Result<Vec<f64>>;

    /// Short description for terminal output, e.g. which model or server
    /// answered.
    fn describe(&self) -> String;
}
