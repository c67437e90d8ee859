//! Prediction dispatch
//!
//! Ties schema lookup, coercion, classification and verdict text together.

use super::{coerce, Classifier, ClassifierRegistry};
use crate::error::PredictError;
use crate::models::{Label, PredictionResult, RawInput, Task};
use crate::observability::{PredictorMetrics, StructuredLogger};
use crate::schema::{messages_for, schema_for};
use std::time::Instant;
use tracing::debug;

/// Run one submission through the classifier for `task`.
///
/// Coercion errors propagate unchanged and the classifier is not invoked.
pub fn predict(
    task: Task,
    raw: &RawInput,
    classifier: &dyn Classifier,
) -> Result<PredictionResult, PredictError> {
    let schema = schema_for(task);
    let features = coerce(raw, &schema)?;

    let class = classifier
        .predict(&features)
        .map_err(|e| PredictError::Inference {
            task,
            message: format!("{:#}", e),
        })?;
    let label = Label::from_class(class).ok_or(PredictError::UnexpectedClass { task, class })?;

    Ok(PredictionResult {
        task,
        label,
        message: messages_for(task).for_label(label).to_string(),
    })
}

/// Serves predictions from a fully loaded classifier registry
pub struct PredictionService {
    registry: ClassifierRegistry,
    metrics: PredictorMetrics,
    logger: StructuredLogger,
}

impl PredictionService {
    pub fn new(
        registry: ClassifierRegistry,
        metrics: PredictorMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            registry,
            metrics,
            logger,
        }
    }

    /// Dispatch to the classifier bound to `task`, recording metrics and logs
    pub fn predict(&self, task: Task, raw: &RawInput) -> Result<PredictionResult, PredictError> {
        let start = Instant::now();
        let outcome = predict(task, raw, self.registry.get(task));
        let elapsed = start.elapsed();

        match &outcome {
            Ok(result) => {
                self.metrics.observe_prediction_latency(task, elapsed.as_secs_f64());
                self.metrics.inc_predictions(task, result.label);
                self.logger.log_prediction(task, result.label, elapsed);
            }
            Err(err) => {
                self.metrics.inc_rejections(task, err.kind());
                self.logger.log_rejection(task, err);
            }
        }
        debug!(task = %task, elapsed_us = elapsed.as_micros(), "Dispatch finished");

        outcome
    }
}
