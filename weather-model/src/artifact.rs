//! The pre-fitted temperature model and its on-disk JSON format.
//!
//! An artifact is an optional standard scaler followed by one regressor.
//! It is loaded and validated once; a [`ModelArtifact`] that exists is
//! always usable, and only row shape or numeric overflow can still fail at
//! prediction time.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    error::PredictError,
    model::{FEATURE_COUNT, FEATURE_NAMES},
    regressor::{Regressor, RegressorKind, RegressorSpec, ensure_finite, regressor_from_spec},
};

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    fn validate(&self, width: usize) -> Result<()> {
        if self.mean.len() != width || self.scale.len() != width {
            bail!(
                "Scaler has {} means and {} scales, expected {width} of each",
                self.mean.len(),
                self.scale.len()
            );
        }
        ensure_finite("scaler.mean", &self.mean)?;
        ensure_finite("scaler.scale", &self.scale)?;
        if let Some(pos) = self.scale.iter().position(|s| *s == 0.0) {
            bail!("scaler.scale[{pos}] is zero");
        }
        Ok(())
    }
}

/// Serialized artifact as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    /// Human readable summary, reported as `model_info`.
    pub description: String,
    /// Column order the model was fitted with. Checked when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
    pub regressor: RegressorSpec,
}

#[derive(Debug)]
pub struct ModelArtifact {
    name: String,
    description: String,
    scaler: Option<StandardScaler>,
    regressor: Box<dyn Regressor>,
}

impl ModelArtifact {
    /// Read and validate the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading model artifact");

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact: {}", path.display()))?;

        Self::from_json(&contents)
            .with_context(|| format!("Invalid model artifact: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ArtifactSpec =
            serde_json::from_str(json).context("Failed to parse model artifact JSON")?;
        Self::from_spec(spec)
    }

    pub fn from_spec(spec: ArtifactSpec) -> Result<Self> {
        if let Some(names) = &spec.feature_names
            && names.iter().map(String::as_str).ne(FEATURE_NAMES)
        {
            bail!(
                "Artifact feature order {names:?} does not match the expected order {FEATURE_NAMES:?}"
            );
        }

        let regressor = regressor_from_spec(spec.regressor)?;
        let width = regressor.n_features();
        if width != FEATURE_COUNT {
            bail!("Model is fitted on {width} features, but records provide {FEATURE_COUNT}");
        }

        if let Some(scaler) = &spec.scaler {
            scaler.validate(width)?;
        }

        Ok(Self {
            name: spec.name,
            description: spec.description,
            scaler: spec.scaler,
            regressor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> RegressorKind {
        self.regressor.kind()
    }

    pub fn n_features(&self) -> usize {
        self.regressor.n_features()
    }

    /// Predict every row in order. Values are returned unrounded.
    pub fn predict<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<f64>, PredictError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.predict_row(i, row.as_ref()))
            .collect()
    }

    fn predict_row(&self, index: usize, row: &[f64]) -> Result<f64, PredictError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(PredictError::ShapeMismatch { expected, got: row.len() });
        }

        let value = match &self.scaler {
            Some(scaler) => self.regressor.predict_row(&scaler.transform(row)),
            None => self.regressor.predict_row(row),
        };

        if !value.is_finite() {
            return Err(PredictError::NonFinite { row: index });
        }
        Ok(value)
    }
}
