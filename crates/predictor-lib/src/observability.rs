//! Observability infrastructure for the predictor
//!
//! Provides:
//! - Prometheus metrics (prediction latency, verdicts, rejections, loaded classifiers)
//! - Structured JSON logging with tracing

use crate::error::{LoadError, PredictError, StartupError};
use crate::models::{Label, Task};
use prometheus::{
    register_gauge_vec, register_histogram_vec, register_int_counter_vec, register_int_gauge,
    GaugeVec, HistogramVec, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{error, info, warn};

/// Histogram buckets for prediction latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PredictorMetricsInner> = OnceLock::new();

struct PredictorMetricsInner {
    prediction_latency_seconds: HistogramVec,
    predictions_total: IntCounterVec,
    rejections_total: IntCounterVec,
    classifiers_loaded: IntGauge,
    model_artifact_info: GaugeVec,
}

impl PredictorMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram_vec!(
                "disease_predictor_prediction_latency_seconds",
                "Time spent coercing input and running the classifier",
                &["task"],
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter_vec!(
                "disease_predictor_predictions_total",
                "Predictions served, by task and verdict",
                &["task", "label"]
            )
            .expect("Failed to register predictions_total"),

            rejections_total: register_int_counter_vec!(
                "disease_predictor_rejections_total",
                "Submissions rejected, by task and error kind",
                &["task", "kind"]
            )
            .expect("Failed to register rejections_total"),

            classifiers_loaded: register_int_gauge!(
                "disease_predictor_classifiers_loaded",
                "Number of task classifiers loaded at startup"
            )
            .expect("Failed to register classifiers_loaded"),

            model_artifact_info: register_gauge_vec!(
                "disease_predictor_model_artifact_info",
                "Artifact backing each task classifier",
                &["task", "artifact"]
            )
            .expect("Failed to register model_artifact_info"),
        }
    }
}

/// Predictor metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct PredictorMetrics {
    _private: (),
}

impl Default for PredictorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PredictorMetricsInner {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new)
    }

    pub fn observe_prediction_latency(&self, task: Task, duration_secs: f64) {
        self.inner()
            .prediction_latency_seconds
            .with_label_values(&[task.slug()])
            .observe(duration_secs);
    }

    pub fn inc_predictions(&self, task: Task, label: Label) {
        self.inner()
            .predictions_total
            .with_label_values(&[task.slug(), label.as_str()])
            .inc();
    }

    pub fn inc_rejections(&self, task: Task, kind: &str) {
        self.inner()
            .rejections_total
            .with_label_values(&[task.slug(), kind])
            .inc();
    }

    pub fn set_classifiers_loaded(&self, count: i64) {
        self.inner().classifiers_loaded.set(count);
    }

    /// Record which artifact serves a task
    pub fn set_model_artifact(&self, task: Task, artifact: &str) {
        self.inner()
            .model_artifact_info
            .with_label_values(&[task.slug(), artifact])
            .set(1.0);
    }
}

/// Structured logger for predictor events
///
/// Provides consistent JSON-formatted logging for startup, predictions
/// and rejected submissions.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log server startup
    pub fn log_startup(&self, version: &str, model_dir: &str) {
        info!(
            event = "server_started",
            instance = %self.instance,
            version = %version,
            model_dir = %model_dir,
            "Disease predictor started"
        );
    }

    pub fn log_classifier_loaded(&self, task: Task, artifact: &str) {
        info!(
            event = "classifier_loaded",
            instance = %self.instance,
            task = %task,
            artifact = %artifact,
            "Classifier ready"
        );
    }

    pub fn log_load_failure(&self, failure: &LoadError) {
        error!(
            event = "classifier_load_failed",
            instance = %self.instance,
            task = %failure.task(),
            kind = failure.kind(),
            error = %failure,
            "Classifier could not be loaded"
        );
    }

    /// Log the aggregate readiness failure
    pub fn log_startup_failure(&self, err: &StartupError) {
        for failure in &err.failures {
            self.log_load_failure(failure);
        }
        error!(
            event = "startup_failed",
            instance = %self.instance,
            failed = err.failures.len(),
            "Failed to load one or more models; predictions disabled"
        );
    }

    /// Log a served prediction. Submitted values are not logged.
    pub fn log_prediction(&self, task: Task, label: Label, elapsed: Duration) {
        info!(
            event = "prediction_served",
            instance = %self.instance,
            task = %task,
            label = label.as_str(),
            elapsed_us = elapsed.as_micros() as u64,
            "Prediction served"
        );
    }

    /// Log a rejected submission
    pub fn log_rejection(&self, task: Task, err: &PredictError) {
        match err {
            PredictError::Validation { index, field, value, .. } => {
                info!(
                    event = "prediction_rejected",
                    instance = %self.instance,
                    task = %task,
                    kind = err.kind(),
                    field_index = *index,
                    field = %field,
                    value = %value,
                    "Rejected non-numeric input"
                );
            }
            PredictError::SchemaMismatch { .. } => {
                warn!(
                    event = "prediction_rejected",
                    instance = %self.instance,
                    task = %task,
                    kind = err.kind(),
                    error = %err,
                    "Submission does not match task schema"
                );
            }
            PredictError::Inference { .. } | PredictError::UnexpectedClass { .. } => {
                error!(
                    event = "prediction_failed",
                    instance = %self.instance,
                    task = %task,
                    kind = err.kind(),
                    error = %err,
                    "Classifier failed"
                );
            }
        }
    }

    /// Log server shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Disease predictor shutting down"
        );
    }
}
