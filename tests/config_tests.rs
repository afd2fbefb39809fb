use crop_forecast::{Error, config};
use pretty_assertions::assert_eq;

mod common;

use common::create_temp_dir;

const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

models:
  yield_model_path: "/srv/models/yield.json"
  price_model_path: "/srv/models/price.json"

crops: ["Rice", "Sorghum"]
"#;

const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;

async fn write_config(contents: &str) -> (tempfile::TempDir, String) {
    let dir = create_temp_dir();
    let path = dir.path().join("config.yaml");
    tokio::fs::write(&path, contents).await.unwrap();
    (dir, path.to_string_lossy().to_string())
}

#[tokio::test]
async fn test_load_full_config() {
    let (_dir, path) = write_config(SAMPLE_CONFIG_YAML).await;

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.models.yield_model_path, "/srv/models/yield.json");
    assert_eq!(config.models.price_model_path, "/srv/models/price.json");
    assert_eq!(config.crops, vec!["Rice", "Sorghum"]);
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn test_load_invalid_yaml() {
    let (_dir, path) = write_config(INVALID_CONFIG_YAML).await;

    let err = config::load_from(&path).await.unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[tokio::test]
async fn test_empty_crop_list_is_rejected() {
    let (_dir, path) = write_config("crops: []\n").await;

    let config = config::load_from(&path).await.unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.is_startup());
}
