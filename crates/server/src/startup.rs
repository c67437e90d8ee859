//! Startup: load every classifier and derive the serving state

use crate::api::AppState;
use predictor_lib::{
    task_info, ClassifierProvider, ClassifierRegistry, HealthRegistry, PredictionService,
    PredictorMetrics, StructuredLogger, Task,
};
use std::sync::Arc;
use tracing::info;

/// Load all three classifiers and record the outcome in health and metrics.
///
/// A single failed load leaves the returned state without a prediction
/// service and permanently not ready.
pub async fn initialize(
    provider: &dyn ClassifierProvider,
    health_registry: HealthRegistry,
    metrics: PredictorMetrics,
    logger: StructuredLogger,
) -> AppState {
    health_registry.register_classifiers().await;

    match ClassifierRegistry::load(provider) {
        Ok(registry) => {
            for task in Task::ALL {
                let artifact = task_info(task).artifact;
                metrics.set_model_artifact(task, artifact);
                logger.log_classifier_loaded(task, artifact);
            }
            metrics.set_classifiers_loaded(Task::ALL.len() as i64);
            health_registry.set_ready(true).await;
            info!("All classifiers loaded, serving predictions");

            let service = PredictionService::new(registry, metrics.clone(), logger);
            AppState::new(health_registry, metrics, Some(Arc::new(service)))
        }
        Err(err) => {
            for failure in &err.failures {
                health_registry.mark_failed(failure.task(), failure.to_string()).await;
            }
            metrics.set_classifiers_loaded((Task::ALL.len() - err.failures.len()) as i64);
            logger.log_startup_failure(&err);

            AppState::new(health_registry, metrics, None)
        }
    }
}
