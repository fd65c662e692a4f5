//! # Configuration Tests
//!
//! File and environment layering as the CLI resolves it.

use serial_test::serial;
use std::env;
use tempfile::TempDir;
use ticket_router::core::config::{self, InferenceProvider};
use ticket_router::core::{ConfigError, RouterConfig};
use ticket_router::inference::{self, InferenceTask};

#[tokio::test]
#[serial]
async fn test_environment_overrides_file_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");

    let mut file_config = RouterConfig::default();
    file_config.backend.base_url = "http://from-file:5001".to_string();
    file_config.sla.critical_minutes = 45;
    file_config.save(&path).await?;

    env::set_var("BACKEND_SERVER_URL", "http://from-env:5001");
    let resolved = config::resolve(Some(&path)).await;
    env::remove_var("BACKEND_SERVER_URL");

    let resolved = resolved?;
    assert_eq!(resolved.backend.base_url, "http://from-env:5001");
    assert_eq!(resolved.sla.critical_minutes, 45);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_invalid_weights_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    tokio::fs::write(&path, "[scoring]\nskill_weight = 0.7\nworkload_weight = 0.4\n").await?;

    let err = config::resolve(Some(&path)).await.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_explicit_missing_file_is_an_error() {
    let err = config::resolve(Some(std::path::Path::new("/nonexistent/ticket-router.toml")))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_stub_provider_reports_unavailable() {
    let mut config = RouterConfig::default();
    config.inference.provider = InferenceProvider::Stub;

    let client = inference::build_client(&config.inference).unwrap();
    let err = client
        .complete(InferenceTask::Sentiment, "Thanks!")
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
