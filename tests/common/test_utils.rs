use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use strength_api::{
    config::ErrorStatusPolicy,
    model::Predictor,
    prediction::PredictionService,
    schema::FEATURE_NAMES,
    server::{self, handlers::AppState},
};
use tempfile::TempDir;

/// A realistic mix design, keyed by canonical feature name
pub fn full_features() -> Map<String, Value> {
    let values = [
        0.45, 400.0, 45.0, 113.0, 350.0, 1150.0, 25.0, 287.5, 862.5, 1.0, 28.0, 95.0,
    ];
    FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect()
}

/// Values of `full_features()` in canonical order
pub fn full_feature_values() -> Vec<f64> {
    let features = full_features();
    FEATURE_NAMES
        .iter()
        .map(|name| features[*name].as_f64().unwrap())
        .collect()
}

pub fn features_without(name: &str) -> Map<String, Value> {
    let mut features = full_features();
    features.remove(name);
    features
}

pub fn create_test_app(
    compressive: Arc<dyn Predictor>,
    tensile: Arc<dyn Predictor>,
    policy: ErrorStatusPolicy,
) -> Router {
    let state = AppState::new(PredictionService::new(compressive, tensile), policy);
    server::router(state)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn predict_request(body: &Value) -> Request<Body> {
    json_request("POST", "/predict", body)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `content` to `name` inside `dir` and return the full path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path.to_string_lossy().to_string()
}

/// Linear model: 10 + 0.05 * Fly_Ash + 0.1 * Curing_Time
pub fn linear_artifact_json() -> String {
    let mut coefficients = vec![0.0; 12];
    coefficients[1] = 0.05;
    coefficients[10] = 0.1;
    json!({
        "kind": "linear",
        "feature_names": FEATURE_NAMES,
        "intercept": 10.0,
        "coefficients": coefficients,
    })
    .to_string()
}

/// Gradient-boosted stumps on curing time and slump
pub const TREE_ARTIFACT_YAML: &str = r#"
kind: tree_ensemble
aggregation: sum
base_score: 2.5
trees:
  - feature: 10
    threshold: 14.0
    left: { value: 0.5 }
    right: { value: 1.0 }
  - feature: 11
    threshold: 100.0
    left: { value: 0.25 }
    right:
      feature: 0
      threshold: 0.5
      left: { value: -0.25 }
      right: { value: 0.75 }
"#;

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  error_status: strict
  logs:
    level: "debug"

models:
  compressive_path: "models/compressive.json"
  tensile_path: "models/tensile.yaml"
"#;
