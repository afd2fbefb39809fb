use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use crop_forecast::{
    config::{Config, LogsConfig, ModelsConfig, ServerConfig},
    pipeline::Predictor,
    server,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

/// yield = 1 + 0.5*crop + 0.1*area + 0.01*rainfall + 0.2*soil
pub const YIELD_MODEL_JSON: &str = r#"{
    "kind": "linear",
    "feature_names": ["Crop", "Area", "Rainfall", "SoilQuality"],
    "coefficients": [0.5, 0.1, 0.01, 0.2],
    "intercept": 1.0
}"#;

/// price = 100 + 10*crop + 20*yield
pub const PRICE_MODEL_JSON: &str = r#"{
    "kind": "linear",
    "feature_names": ["Crop", "Yield"],
    "coefficients": [10.0, 20.0],
    "intercept": 100.0
}"#;

pub fn default_crops() -> Vec<String> {
    ["Rice", "Wheat", "Maize", "Barley"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write both fixture models and return a config pointing at them
pub async fn create_test_config(dir: &TempDir) -> Config {
    let yield_path = dir.path().join("yield_model.json");
    let price_path = dir.path().join("price_model.json");
    tokio::fs::write(&yield_path, YIELD_MODEL_JSON).await.unwrap();
    tokio::fs::write(&price_path, PRICE_MODEL_JSON).await.unwrap();

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        models: ModelsConfig {
            yield_model_path: yield_path.to_string_lossy().to_string(),
            price_model_path: price_path.to_string_lossy().to_string(),
        },
        crops: default_crops(),
    }
}

/// Models shipped with the repository
pub fn shipped_config() -> Config {
    let root = env!("CARGO_MANIFEST_DIR");
    let mut config = Config::default();
    config.models.yield_model_path = format!("{}/models/yield_model.json", root);
    config.models.price_model_path = format!("{}/models/price_model.json", root);
    config
}

pub async fn create_test_app() -> (Router, TempDir) {
    let temp_dir = create_temp_dir();
    let config = create_test_config(&temp_dir).await;
    let predictor = Predictor::from_config(&config).await.unwrap();
    (server::router(Arc::new(predictor)), temp_dir)
}

pub fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a form to `/predict` and decode the JSON context
pub async fn post_form(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app.oneshot(form_request(body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub const INVALID_CROP_MESSAGE: &str = "Invalid crop. Allowed values: Rice, Wheat, Maize, Barley";
pub const NOT_NUMERIC_MESSAGE: &str = "Area, rainfall, and soil quality must be numeric values.";
pub const OUT_OF_RANGE_MESSAGE: &str =
    "Ensure area, rainfall, and soil quality are positive numbers.";
