//! Unified configuration for the ticket router
//!
//! One structure carries every tunable the services need. It is loaded once
//! by the entry point and handed to constructors explicitly.

use crate::core::constants::{proficiency, sla_minutes, weights};
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Backend store holding tickets, technicians and the skill catalog
    pub backend: BackendConfig,

    /// Inference provider used for skill extraction, justification and evaluation
    pub inference: InferenceConfig,

    /// Suitability score weights
    pub scoring: ScoringConfig,

    /// Resolution targets by priority
    pub sla: SlaConfig,

    /// Proficiency update coefficients
    pub proficiency: ProficiencyConfig,

    /// Retry policy applied by callers to retryable failures
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InferenceProvider {
    #[default]
    Gemini,
    /// Deterministic offline provider; every inference call degrades to local fallbacks
    Stub,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    pub provider: InferenceProvider,
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    pub timeout_seconds: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            provider: InferenceProvider::Gemini,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            temperature: 0.1,
            max_output_tokens: None,
            timeout_seconds: 10,
        }
    }
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub workload_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: weights::SKILL_MATCH,
            workload_weight: weights::WORKLOAD,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlaConfig {
    pub critical_minutes: i64,
    pub high_minutes: i64,
    pub normal_minutes: i64,
    pub low_minutes: i64,
    pub default_minutes: i64,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            critical_minutes: sla_minutes::CRITICAL,
            high_minutes: sla_minutes::HIGH,
            normal_minutes: sla_minutes::NORMAL,
            low_minutes: sla_minutes::LOW,
            default_minutes: sla_minutes::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProficiencyConfig {
    pub retention: f64,
    pub gain: f64,
    pub missed_sla_multiplier: f64,
}

impl Default for ProficiencyConfig {
    fn default() -> Self {
        Self {
            retention: proficiency::RETENTION,
            gain: proficiency::GAIN,
            missed_sla_multiplier: proficiency::MISSED_SLA_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 250,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offline configuration for tests: stub inference, no retries.
    pub fn testing() -> Self {
        Self {
            inference: InferenceConfig {
                provider: InferenceProvider::Stub,
                timeout_seconds: 2,
                ..InferenceConfig::default()
            },
            backend: BackendConfig {
                timeout_seconds: 2,
                ..BackendConfig::default()
            },
            retry: RetryConfig {
                max_retries: 0,
                ..RetryConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from file, falling back to defaults if file doesn't exist
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path).await
        } else {
            Ok(Self::new())
        }
    }

    /// Load configuration from TOML file
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::Serialize {
                    reason: e.to_string(),
                })?;
        }

        let content = self.to_toml()?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| ConfigError::Serialize {
                reason: e.to_string(),
            })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            reason: e.to_string(),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(invalid("backend.base_url", "", "must not be empty"));
        }
        if self.backend.timeout_seconds == 0 {
            return Err(invalid("backend.timeout_seconds", "0", "must be greater than 0"));
        }
        if self.inference.timeout_seconds == 0 {
            return Err(invalid("inference.timeout_seconds", "0", "must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.inference.temperature) {
            return Err(invalid(
                "inference.temperature",
                self.inference.temperature,
                "must be between 0.0 and 2.0",
            ));
        }

        let scoring = &self.scoring;
        if scoring.skill_weight < 0.0 || scoring.workload_weight < 0.0 {
            return Err(invalid(
                "scoring",
                format!("{}/{}", scoring.skill_weight, scoring.workload_weight),
                "weights must not be negative",
            ));
        }
        if ((scoring.skill_weight + scoring.workload_weight) - 1.0).abs() > 1e-9 {
            return Err(invalid(
                "scoring",
                format!("{}/{}", scoring.skill_weight, scoring.workload_weight),
                "weights must sum to 1.0",
            ));
        }

        let sla = &self.sla;
        for (field, minutes) in [
            ("sla.critical_minutes", sla.critical_minutes),
            ("sla.high_minutes", sla.high_minutes),
            ("sla.normal_minutes", sla.normal_minutes),
            ("sla.low_minutes", sla.low_minutes),
            ("sla.default_minutes", sla.default_minutes),
        ] {
            if minutes <= 0 {
                return Err(invalid(field, minutes, "must be greater than 0"));
            }
        }

        let prof = &self.proficiency;
        for (field, value) in [
            ("proficiency.retention", prof.retention),
            ("proficiency.gain", prof.gain),
            ("proficiency.missed_sla_multiplier", prof.missed_sla_multiplier),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, value, "must be between 0.0 and 1.0"));
            }
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(invalid(
                "retry.backoff_multiplier",
                self.retry.backoff_multiplier,
                "must be at least 1.0",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = RouterConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.timeout_seconds, 10);
        assert_eq!(config.scoring.skill_weight, 0.6);
        assert_eq!(config.sla.high_minutes, 240);
        assert_eq!(config.proficiency.missed_sla_multiplier, 0.8);
    }

    #[tokio::test]
    async fn test_config_save_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_file = temp_dir.path().join("router.toml");

        let mut config = RouterConfig::new();
        config.backend.base_url = "http://backend.internal:5001".to_string();
        config.sla.low_minutes = 2880;

        config.save(&config_file).await?;
        assert!(config_file.exists());

        let loaded = RouterConfig::load(&config_file).await?;
        assert_eq!(loaded.backend.base_url, "http://backend.internal:5001");
        assert_eq!(loaded.sla.low_minutes, 2880);
        assert_eq!(loaded, config);

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_file = temp_dir.path().join("router.toml");
        tokio::fs::write(&config_file, "[inference]\nprovider = \"stub\"\n").await?;

        let loaded = RouterConfig::load(&config_file).await?;
        assert_eq!(loaded.inference.provider, InferenceProvider::Stub);
        assert_eq!(loaded.inference.model, "gemini-2.5-flash");
        assert_eq!(loaded.scoring, ScoringConfig::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let loaded = RouterConfig::load_or_default(Path::new("/nonexistent/router.toml"))
            .await
            .unwrap();
        assert_eq!(loaded, RouterConfig::default());

        let err = RouterConfig::load(Path::new("/nonexistent/router.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RouterConfig::new();

        config.scoring.skill_weight = 0.7;
        assert!(config.validate().is_err());

        config.scoring.skill_weight = 0.6;
        config.sla.critical_minutes = 0;
        assert!(config.validate().is_err());

        config.sla.critical_minutes = 60;
        config.proficiency.gain = 1.5;
        assert!(config.validate().is_err());

        config.proficiency.gain = 0.3;
        config.backend.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
