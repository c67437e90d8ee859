//! Core library of the disease predictor
//!
//! This crate provides:
//! - Feature schemas for the diabetes, heart disease and Parkinson's tasks
//! - Coercion of submitted form text into feature vectors
//! - Loading of the per-task ONNX classifiers and prediction dispatch
//! - Health checks and observability

pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod schema;

pub use error::{LoadError, PredictError, StartupError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{PredictorMetrics, StructuredLogger};
pub use predictor::{
    coerce, predict, Classifier, ClassifierProvider, ClassifierRegistry, OnnxProvider,
    PredictionService,
};
pub use schema::{messages_for, schema_for, task_info, FeatureSchema, TaskInfo};
