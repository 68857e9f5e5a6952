use thiserror::Error;

/// Failures on the prediction path.
///
/// The HTTP layer flattens every variant into the same `{error, status}`
/// payload; [`PredictError::kind`] is what ends up in the logs.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("X has {got} features, but the model is expecting {expected} features as input")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Model produced a non-finite prediction for row {row}")]
    NonFinite { row: usize },

    #[error("Prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Prediction service returned an error: {message}")]
    Remote { message: String },
}

impl PredictError {
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ShapeMismatch { .. } => "shape_mismatch",
            PredictError::NonFinite { .. } => "non_finite",
            PredictError::Transport(_) => "transport",
            PredictError::Remote { .. } => "remote",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_both_widths() {
        let err = PredictError::ShapeMismatch { expected: 6, got: 4 };
        assert_eq!(err.kind(), "shape_mismatch");
        assert_eq!(
            err.to_string(),
            "X has 4 features, but the model is expecting 6 features as input"
        );
    }

    #[test]
    fn remote_error_keeps_server_message() {
        let err = PredictError::Remote { message: "bad input".into() };
        assert_eq!(err.kind(), "remote");
        assert!(err.to_string().ends_with("bad input"));
    }
}
