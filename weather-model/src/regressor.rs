use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::regressor::{linear::LinearRegressor, svr::SupportVectorRegressor};

pub mod linear;
pub mod svr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegressorKind {
    Linear,
    Svr,
}

impl RegressorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegressorKind::Linear => "linear",
            RegressorKind::Svr => "svr",
        }
    }
}

impl std::fmt::Display for RegressorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fitted estimator evaluated one (already scaled) row at a time.
pub trait Regressor: Send + Sync + Debug {
    fn kind(&self) -> RegressorKind;

    /// Width of the rows this estimator was fitted on.
    fn n_features(&self) -> usize;

    /// Check the fitted parameters are usable. Called once at load time.
    fn validate(&self) -> Result<()>;

    /// Evaluate one row. Callers guarantee `x.len() == self.n_features()`.
    fn predict_row(&self, x: &[f64]) -> f64;
}

/// Serialized form of the estimator stored in a model artifact, tagged by
/// `"kind"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorSpec {
    Linear(LinearRegressor),
    Svr(SupportVectorRegressor),
}

/// Validate a serialized estimator and turn it into a trait object.
pub fn regressor_from_spec(spec: RegressorSpec) -> Result<Box<dyn Regressor>> {
    let boxed: Box<dyn Regressor> = match spec {
        RegressorSpec::Linear(linear) => Box::new(linear),
        RegressorSpec::Svr(svr) => Box::new(svr),
    };

    if boxed.n_features() == 0 {
        bail!("The {} regressor has no input features", boxed.kind());
    }
    boxed.validate()?;

    Ok(boxed)
}

pub(crate) fn ensure_finite(what: &str, values: &[f64]) -> Result<()> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        bail!("{what}[{pos}] is not a finite number");
    }
    Ok(())
}
