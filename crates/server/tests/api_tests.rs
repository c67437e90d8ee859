//! Integration tests for the server API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use outbreak_server::{api::create_router, startup::initialize};
use predictor_lib::{
    schema_for, Classifier, ClassifierProvider, FeatureVector, HealthRegistry, LoadError,
    OnnxProvider, PredictorMetrics, StructuredLogger, Task,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Answers 1 when the first feature is positive, 0 otherwise, and refuses
/// vectors of the wrong width for its task.
struct SignClassifier {
    width: usize,
}

impl Classifier for SignClassifier {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<i64> {
        anyhow::ensure!(features.len() == self.width, "wrong feature width");
        Ok(i64::from(features.as_slice()[0] > 0.0))
    }
}

struct StubProvider {
    missing: HashSet<Task>,
}

impl ClassifierProvider for StubProvider {
    fn load(&self, task: Task) -> Result<Arc<dyn Classifier>, LoadError> {
        if self.missing.contains(&task) {
            return Err(LoadError::NotFound {
                task,
                path: PathBuf::from(format!("models/{}.onnx", task)),
            });
        }
        Ok(Arc::new(SignClassifier {
            width: schema_for(task).len(),
        }))
    }
}

async fn setup_app(missing: &[Task]) -> Router {
    let provider = StubProvider {
        missing: missing.iter().copied().collect(),
    };
    let state = initialize(
        &provider,
        HealthRegistry::new(),
        PredictorMetrics::new(),
        StructuredLogger::new("test"),
    )
    .await;
    create_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post_values(app: Router, uri: &str, values: &[&str]) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "values": values }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_ready_when_all_classifiers_load() {
    let app = setup_app(&[]).await;

    let (status, health) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, readiness) = get(app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(readiness["ready"], true);
}

#[tokio::test]
async fn test_diabetic_prediction() {
    let app = setup_app(&[]).await;

    let (status, body) = post_values(
        app,
        "/api/v1/tasks/diabetes/predict",
        &["2", "120", "70", "30", "80", "28.5", "0.5", "33"],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"], "diabetes");
    assert_eq!(body["label"], "positive");
    assert_eq!(body["message"], "The person is diabetic");
}

#[tokio::test]
async fn test_not_diabetic_prediction() {
    let app = setup_app(&[]).await;

    let (status, body) = post_values(
        app,
        "/api/v1/tasks/diabetes/predict",
        &["0", "120", "70", "30", "80", "28.5", "0.5", "33"],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The person is not diabetic");
}

#[tokio::test]
async fn test_heart_disease_reaches_its_own_classifier() {
    let app = setup_app(&[]).await;

    let (status, body) = post_values(app, "/api/v1/tasks/heart-disease/predict", &["63"; 13]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"], "heart_disease");
    assert_eq!(body["message"], "The person has heart disease");
}

#[tokio::test]
async fn test_non_numeric_field_is_rejected() {
    let app = setup_app(&[]).await;
    let mut values = vec!["0.5"; 22];
    values[5] = "abc";

    let (status, body) = post_values(app, "/api/v1/tasks/parkinsons/predict", &values).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation");
    assert_eq!(body["field_index"], 5);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_wrong_value_count_is_bad_request() {
    let app = setup_app(&[]).await;

    let (status, body) = post_values(app, "/api/v1/tasks/parkinsons/predict", &["1", "2"]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "schema_mismatch");
}

#[tokio::test]
async fn test_unknown_task_is_not_found() {
    let app = setup_app(&[]).await;

    let (status, body) = post_values(app, "/api/v1/tasks/cancer/predict", &["1"]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "unknown_task");
}

#[tokio::test]
async fn test_task_listing_and_schema() {
    let app = setup_app(&[]).await;

    let (status, list) = get(app.clone(), "/api/v1/tasks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["title"], "Prediction of Disease Outbreaks");
    let arities: Vec<u64> = list["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["arity"].as_u64().unwrap())
        .collect();
    assert_eq!(arities, vec![8, 13, 22]);

    let (status, schema) = get(app, "/api/v1/tasks/parkinsons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["title"], "Parkinson's Disease Prediction");
    assert_eq!(schema["fields"].as_array().unwrap().len(), 22);
    assert_eq!(schema["fields"][5]["name"], "rap");
    assert_eq!(schema["fields"][5]["index"], 5);
}

#[tokio::test]
async fn test_missing_parkinsons_model_disables_every_task() {
    let app = setup_app(&[Task::Parkinsons]).await;

    let (status, readiness) = get(app.clone(), "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(readiness["ready"], false);
    assert!(readiness["reason"]
        .as_str()
        .unwrap()
        .starts_with("Failed to load one or more models"));

    let (status, health) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["components"]["classifier.parkinsons"]["status"], "unhealthy");
    assert_eq!(health["components"]["classifier.diabetes"]["status"], "healthy");

    let (status, _) = post_values(
        app.clone(),
        "/api/v1/tasks/diabetes/predict",
        &["2", "120", "70", "30", "80", "28.5", "0.5", "33"],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        post_values(app.clone(), "/api/v1/tasks/heart_disease/predict", &["1"; 13]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app, "/api/v1/tasks").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_model_dir_is_not_ready() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = initialize(
        &OnnxProvider::new(dir.path()),
        HealthRegistry::new(),
        PredictorMetrics::new(),
        StructuredLogger::new("test"),
    )
    .await;
    assert!(state.service.is_none());

    let app = create_router(Arc::new(state));
    let (status, health) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    for task in Task::ALL {
        let component = format!("classifier.{}", task);
        assert_eq!(health["components"][component.as_str()]["status"], "unhealthy");
    }
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup_app(&[]).await;

    // Serve one prediction so the per-task series exist
    let (status, _) =
        post_values(app.clone(), "/api/v1/tasks/heart_disease/predict", &["1"; 13]).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("disease_predictor_predictions_total"));
    assert!(text.contains("disease_predictor_classifiers_loaded"));
}
