//! Health check infrastructure for the predictor
//!
//! Tracks one component per task classifier. A classifier is either loaded
//! or failed; the service is ready only once every classifier has loaded,
//! and a failed startup never becomes ready.

use crate::models::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Message reported while any classifier is failed
pub const LOAD_FAILURE_REASON: &str =
    "Failed to load one or more models. Please check the model files.";

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

/// Information about a component's health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: ComponentStatus::Healthy,
            message: None,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ComponentStatus::Unhealthy,
            message: Some(message.into()),
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Overall health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Unhealthy as soon as one component is
    pub fn compute_status(components: &HashMap<String, ComponentHealth>) -> ComponentStatus {
        if components.values().any(|health| health.status == ComponentStatus::Unhealthy) {
            ComponentStatus::Unhealthy
        } else {
            ComponentStatus::Healthy
        }
    }
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Component names for health tracking
pub mod components {
    use crate::models::Task;

    pub const DIABETES_CLASSIFIER: &str = "classifier.diabetes";
    pub const HEART_DISEASE_CLASSIFIER: &str = "classifier.heart_disease";
    pub const PARKINSONS_CLASSIFIER: &str = "classifier.parkinsons";

    /// Health component tracking the classifier of `task`
    pub fn classifier(task: Task) -> &'static str {
        match task {
            Task::Diabetes => DIABETES_CLASSIFIER,
            Task::HeartDisease => HEART_DISEASE_CLASSIFIER,
            Task::Parkinsons => PARKINSONS_CLASSIFIER,
        }
    }
}

/// Health registry for tracking classifier health
#[derive(Debug, Clone)]
pub struct HealthRegistry {
    components: Arc<RwLock<HashMap<String, ComponentHealth>>>,
    ready: Arc<RwLock<bool>>,
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            components: Arc::new(RwLock::new(HashMap::new())),
            ready: Arc::new(RwLock::new(false)),
        }
    }

    /// Register the classifier component of every task as healthy
    pub async fn register_classifiers(&self) {
        let mut tracked = self.components.write().await;
        for task in Task::ALL {
            tracked.insert(
                components::classifier(task).to_string(),
                ComponentHealth::healthy(),
            );
        }
    }

    /// Mark the classifier of `task` as failed to load
    pub async fn mark_failed(&self, task: Task, message: impl Into<String>) {
        let mut tracked = self.components.write().await;
        tracked.insert(
            components::classifier(task).to_string(),
            ComponentHealth::unhealthy(message),
        );
    }

    /// Set readiness status
    pub async fn set_ready(&self, ready: bool) {
        let mut r = self.ready.write().await;
        *r = ready;
    }

    /// Get health response
    pub async fn health(&self) -> HealthResponse {
        let components = self.components.read().await.clone();
        let status = HealthResponse::compute_status(&components);
        HealthResponse { status, components }
    }

    /// Get readiness response
    pub async fn readiness(&self) -> ReadinessResponse {
        let ready = *self.ready.read().await;
        let health = self.health().await;

        // Every classifier is critical: one failed load blocks all tasks
        if health.status == ComponentStatus::Unhealthy {
            ReadinessResponse {
                ready: false,
                reason: Some(LOAD_FAILURE_REASON.to_string()),
            }
        } else if !ready {
            ReadinessResponse {
                ready: false,
                reason: Some("Classifiers not yet loaded".to_string()),
            }
        } else {
            ReadinessResponse {
                ready: true,
                reason: None,
            }
        }
    }
}
