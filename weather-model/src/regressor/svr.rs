use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::{Regressor, RegressorKind, ensure_finite};

fn default_degree() -> i32 {
    3
}

/// Kernel function of a support vector machine, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf {
        gamma: f64,
    },
    Poly {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
        #[serde(default = "default_degree")]
        degree: i32,
    },
    Sigmoid {
        gamma: f64,
        #[serde(default)]
        coef0: f64,
    },
}

impl Kernel {
    pub fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let dist2: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * dist2).exp()
            }
            Kernel::Poly { gamma, coef0, degree } => {
                (gamma * dot(a, b) + coef0).powi(*degree)
            }
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }

    fn validate(&self) -> Result<()> {
        let gamma = match self {
            Kernel::Linear => return Ok(()),
            Kernel::Rbf { gamma } | Kernel::Poly { gamma, .. } | Kernel::Sigmoid { gamma, .. } => {
                *gamma
            }
        };

        if !gamma.is_finite() || gamma <= 0.0 {
            bail!("Kernel gamma must be a positive finite number, got {gamma}");
        }

        match self {
            Kernel::Poly { degree, .. } if *degree < 0 => {
                bail!("Polynomial kernel degree must not be negative, got {degree}")
            }
            Kernel::Poly { coef0, .. } | Kernel::Sigmoid { coef0, .. } => {
                ensure_finite("kernel.coef0", &[*coef0])
            }
            _ => Ok(()),
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Epsilon-SVR in dual form:
/// `y = Σ dual_coef[i] · K(support_vectors[i], x) + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportVectorRegressor {
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for SupportVectorRegressor {
    fn kind(&self) -> RegressorKind {
        RegressorKind::Svr
    }

    fn n_features(&self) -> usize {
        self.support_vectors.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> Result<()> {
        if self.support_vectors.is_empty() {
            bail!("SVR has no support vectors");
        }
        if self.dual_coef.len() != self.support_vectors.len() {
            bail!(
                "SVR has {} support vectors but {} dual coefficients",
                self.support_vectors.len(),
                self.dual_coef.len()
            );
        }

        let width = self.n_features();
        for (i, sv) in self.support_vectors.iter().enumerate() {
            if sv.len() != width {
                bail!("Support vector {i} has {} features, expected {width}", sv.len());
            }
            ensure_finite(&format!("support_vectors[{i}]"), sv)?;
        }

        ensure_finite("dual_coef", &self.dual_coef)?;
        ensure_finite("intercept", &[self.intercept])?;
        self.kernel.validate()
    }

    fn predict_row(&self, x: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, alpha)| alpha * self.kernel.eval(sv, x))
            .sum::<f64>()
            + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rbf_model() -> SupportVectorRegressor {
        SupportVectorRegressor {
            kernel: Kernel::Rbf { gamma: 0.5 },
            support_vectors: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            dual_coef: vec![2.0, -1.0],
            intercept: 10.0,
        }
    }

    #[test]
    fn rbf_prediction_sums_weighted_kernels() {
        let model = rbf_model();
        model.validate().unwrap();

        // K(sv0, x) = 1, K(sv1, x) = exp(-0.5 * 2)
        let expected = 2.0 - (-1.0f64).exp() + 10.0;
        let got = model.predict_row(&[0.0, 0.0]);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn kernels_evaluate_as_documented() {
        let a = [1.0, 2.0];
        let b = [3.0, -1.0];

        assert_eq!(Kernel::Linear.eval(&a, &b), 1.0);
        assert_eq!(Kernel::Poly { gamma: 2.0, coef0: 1.0, degree: 2 }.eval(&a, &b), 9.0);
        assert!((Kernel::Sigmoid { gamma: 1.0, coef0: 0.0 }.eval(&a, &b) - 1.0f64.tanh()).abs() < 1e-12);
        // |a - b|^2 = 13
        assert!((Kernel::Rbf { gamma: 0.1 }.eval(&a, &b) - (-1.3f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn poly_kernel_defaults_follow_libsvm() {
        let kernel: Kernel = serde_json::from_value(json!({"type": "poly", "gamma": 0.2})).unwrap();
        assert_eq!(kernel, Kernel::Poly { gamma: 0.2, coef0: 0.0, degree: 3 });
    }

    #[test]
    fn mismatched_dual_coef_fails_validation() {
        let mut model = rbf_model();
        model.dual_coef.pop();
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("2 support vectors but 1 dual coefficients"));
    }

    #[test]
    fn ragged_support_vectors_fail_validation() {
        let mut model = rbf_model();
        model.support_vectors[1].push(3.0);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("Support vector 1 has 3 features, expected 2"));
    }

    #[test]
    fn non_positive_gamma_fails_validation() {
        let mut model = rbf_model();
        model.kernel = Kernel::Rbf { gamma: 0.0 };
        assert!(model.validate().is_err());
    }

    #[test]
    fn poly_degree_must_fit_a_non_negative_exponent() {
        let mut model = rbf_model();
        model.kernel = Kernel::Poly { gamma: 1.0, coef0: 0.0, degree: -2 };
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("must not be negative"));

        let too_large = json!({"type": "poly", "gamma": 1.0, "degree": 4_294_967_295u64});
        assert!(serde_json::from_value::<Kernel>(too_large).is_err());
    }
}
