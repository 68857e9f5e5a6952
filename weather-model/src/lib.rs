//! Core library for the Basel temperature prediction service.
//!
//! This crate defines:
//! - Feature records and the JSON payloads exchanged over HTTP
//! - The model artifact format and its evaluation
//! - Abstraction over predictors (in-process or remote)
//! - Configuration handling
//!
//! It is used by `weather-api`, but can also be reused by other binaries or services.

pub mod artifact;
pub mod config;
pub mod error;
pub mod model;
pub mod predictor;
pub mod regressor;

pub use artifact::ModelArtifact;
pub use config::Config;
pub use error::PredictError;
pub use model::{BatchRequest, BatchResponse, FeatureRecord, PredictResponse, Status};
pub use predictor::{Predictor, local::LocalPredictor, remote::RemotePredictor};
pub use regressor::RegressorKind;
