//! Error types for classifier loading and prediction

use crate::models::Task;
use std::path::PathBuf;

/// Failure to load one task's classifier artifact
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model artifact for {task} not found at {}", .path.display())]
    NotFound { task: Task, path: PathBuf },

    #[error("model artifact for {task} is corrupt: {reason}")]
    Corrupt { task: Task, reason: String },
}

impl LoadError {
    pub fn task(&self) -> Task {
        match self {
            LoadError::NotFound { task, .. } | LoadError::Corrupt { task, .. } => *task,
        }
    }

    /// Short machine-readable kind, used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound { .. } => "not_found",
            LoadError::Corrupt { .. } => "corrupt",
        }
    }
}

/// Aggregate readiness failure: at least one classifier failed to load
#[derive(Debug, thiserror::Error)]
#[error("Failed to load one or more models. Please check the model files. ({})", summarize(.failures))]
pub struct StartupError {
    pub failures: Vec<LoadError>,
}

impl StartupError {
    pub fn failed_tasks(&self) -> Vec<Task> {
        self.failures.iter().map(LoadError::task).collect()
    }
}

fn summarize(failures: &[LoadError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by a single prediction request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("{task} expects {expected} values, got {actual}")]
    SchemaMismatch {
        task: Task,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input for field {index} ({field}): {value:?} is not a number. Please enter numeric values.")]
    Validation {
        task: Task,
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("{task} classifier failed: {message}")]
    Inference { task: Task, message: String },

    #[error("{task} classifier returned class {class}, expected 0 or 1")]
    UnexpectedClass { task: Task, class: i64 },
}

impl PredictError {
    /// Short machine-readable kind, used in API responses and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::SchemaMismatch { .. } => "schema_mismatch",
            PredictError::Validation { .. } => "validation",
            PredictError::Inference { .. } => "inference",
            PredictError::UnexpectedClass { .. } => "unexpected_class",
        }
    }
}
