use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Regressor, RegressorKind, ensure_finite};

/// Ordinary least squares fit: `y = coef · x + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn kind(&self) -> RegressorKind {
        RegressorKind::Linear
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("coef", &self.coef)?;
        ensure_finite("intercept", &[self.intercept])
    }

    fn predict_row(&self, x: &[f64]) -> f64 {
        self.coef.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + self.intercept
    }
}
