//! Prediction engine: input coercion, classifier loading and dispatch

mod coerce;
mod dispatch;
mod inference;
mod registry;

pub use coerce::coerce;
pub use dispatch::{predict, PredictionService};
pub use inference::{OnnxClassifier, OnnxProvider, MODEL_EXTENSION};
pub use registry::ClassifierRegistry;

use crate::error::LoadError;
use crate::models::{FeatureVector, Task};
use anyhow::Result;
use std::sync::Arc;

/// A pre-trained binary classifier bound to one task
///
/// Implementations are shared read-only across requests, so `predict`
/// takes `&self` and must not mutate model state.
pub trait Classifier: Send + Sync {
    /// Classify one feature vector, returning the raw class index
    fn predict(&self, features: &FeatureVector) -> Result<i64>;
}

/// Source of classifiers, consulted once per task at startup
pub trait ClassifierProvider {
    fn load(&self, task: Task) -> std::result::Result<Arc<dyn Classifier>, LoadError>;
}
