//! HTTP API for predictions, health checks and Prometheus metrics

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use predictor_lib::{
    health::{ComponentStatus, HealthRegistry},
    models::UnknownTask,
    observability::PredictorMetrics,
    schema::APP_TITLE,
    schema_for, task_info, PredictError, PredictionResult, PredictionService, RawInput, Task,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: PredictorMetrics,
    /// Present only when every classifier loaded
    pub service: Option<Arc<PredictionService>>,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: PredictorMetrics,
        service: Option<Arc<PredictionService>>,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub task: Task,
    pub menu_label: &'static str,
    pub title: &'static str,
    pub arity: usize,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub title: &'static str,
    pub tasks: Vec<TaskSummary>,
}

#[derive(Debug, Serialize)]
pub struct FieldEntry {
    pub index: usize,
    pub name: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TaskSchemaResponse {
    pub task: Task,
    pub title: &'static str,
    pub action: &'static str,
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_index: Option<usize>,
}

/// Error returned by the API handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        let (status, field_index) = match &err {
            PredictError::Validation { index, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(*index))
            }
            PredictError::SchemaMismatch { .. } => (StatusCode::BAD_REQUEST, None),
            PredictError::Inference { .. } | PredictError::UnexpectedClass { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        Self {
            status,
            body: ErrorResponse {
                error: err.to_string(),
                code: err.kind(),
                field_index,
            },
        }
    }
}

impl From<UnknownTask> for ApiError {
    fn from(err: UnknownTask) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse {
                error: err.to_string(),
                code: "unknown_task",
                field_index: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

async fn list_tasks() -> Json<TaskList> {
    let tasks = Task::ALL
        .into_iter()
        .map(|task| {
            let info = task_info(task);
            TaskSummary {
                task,
                menu_label: info.menu_label,
                title: info.title,
                arity: schema_for(task).len(),
            }
        })
        .collect();

    Json(TaskList {
        title: APP_TITLE,
        tasks,
    })
}

async fn get_task(Path(task): Path<String>) -> Result<Json<TaskSchemaResponse>, ApiError> {
    let task: Task = task.parse()?;
    let info = task_info(task);
    let fields = schema_for(task)
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| FieldEntry {
            index,
            name: field.name,
            label: field.label,
        })
        .collect();

    Ok(Json(TaskSchemaResponse {
        task,
        title: info.title,
        action: info.action,
        fields,
    }))
}

async fn predict(
    State(service): State<Arc<PredictionService>>,
    Path(task): Path<String>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    let task: Task = task.parse()?;
    let result = service.predict(task, &RawInput::new(request.values))?;
    Ok(Json(result))
}

fn prediction_routes(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route("/api/v1/tasks", get(list_tasks))
        .route("/api/v1/tasks/:task", get(get_task))
        .route("/api/v1/tasks/:task/predict", post(predict))
        .with_state(service)
}

/// Create the API router
///
/// Probe and metrics routes are always mounted; prediction routes only
/// when the state carries a prediction service.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state.clone());

    match &state.service {
        Some(service) => router.merge(prediction_routes(service.clone())),
        None => router,
    }
}

/// Start the API server
pub async fn serve(addr: String, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
