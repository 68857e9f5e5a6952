use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of features a [`FeatureRecord`] contributes to a model row.
pub const FEATURE_COUNT: usize = 6;

/// Positional order the artifact expects its input columns in.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "BASEL_temp_mean_lag1",
    "BASEL_temp_mean_lag3",
    "BASEL_temp_mean_lag7",
    "BASEL_temp_mean_roll7",
    "month",
    "dayofyear",
];

/// One set of inputs for a single temperature prediction.
///
/// Field names follow the column names of the training data, so the JSON
/// body of `/predict` maps onto this struct directly. Every field is
/// required; `month` and `dayofyear` are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Mean temperature one day earlier (°C).
    #[serde(rename = "BASEL_temp_mean_lag1")]
    pub lag1: f64,
    /// Mean temperature three days earlier (°C).
    #[serde(rename = "BASEL_temp_mean_lag3")]
    pub lag3: f64,
    /// Mean temperature seven days earlier (°C).
    #[serde(rename = "BASEL_temp_mean_lag7")]
    pub lag7: f64,
    /// Trailing 7-day mean temperature (°C).
    #[serde(rename = "BASEL_temp_mean_roll7")]
    pub roll7: f64,
    pub month: i64,
    pub dayofyear: i64,
}

impl FeatureRecord {
    /// Build a record whose calendar fields come from `date`.
    pub fn for_date(lag1: f64, lag3: f64, lag7: f64, roll7: f64, date: NaiveDate) -> Self {
        Self {
            lag1,
            lag3,
            lag7,
            roll7,
            month: i64::from(date.month()),
            dayofyear: i64::from(date.ordinal()),
        }
    }

    /// Model row in [`FEATURE_NAMES`] order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.lag1,
            self.lag3,
            self.lag7,
            self.roll7,
            self.month as f64,
            self.dayofyear as f64,
        ]
    }
}

/// Body of `/batch_predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    pub data: Vec<FeatureRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Response of `/predict`. Failures are reported in-band, never as an
/// HTTP error status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        predicted_temperature: f64,
        status: Status,
        model_info: String,
    },
    Error {
        error: String,
        status: Status,
        predicted_temperature: Option<f64>,
    },
}

impl PredictResponse {
    pub fn success(predicted_temperature: f64, model_info: impl Into<String>) -> Self {
        Self::Success {
            predicted_temperature,
            status: Status::Success,
            model_info: model_info.into(),
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
            status: Status::Error,
            predicted_temperature: None,
        }
    }
}

/// Response of `/batch_predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Success {
        predicted_temperatures: Vec<f64>,
        status: Status,
        count: usize,
    },
    Error {
        error: String,
        status: Status,
        predicted_temperatures: Vec<f64>,
    },
}

impl BatchResponse {
    pub fn success(predicted_temperatures: Vec<f64>) -> Self {
        Self::Success {
            count: predicted_temperatures.len(),
            predicted_temperatures,
            status: Status::Success,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
            status: Status::Error,
            predicted_temperatures: Vec::new(),
        }
    }
}

/// Round to two decimal places.
///
/// Rounds the exact binary value and breaks true ties to even, so `2.675`
/// (stored as `2.67499...`) becomes `2.67` and `0.125` becomes `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
