//! Environment variable overrides for [`RouterConfig`]

use super::unified::RouterConfig;
use std::env;
use tracing::{debug, warn};

/// Applies process environment on top of file or default configuration
pub struct EnvLoader {
    prefix: String,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new("TICKET_ROUTER_")
    }
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Apply environment variables to existing config
    pub fn apply_env_overrides(&self, mut config: RouterConfig) -> RouterConfig {
        // Variable names shared with the wider deployment
        if let Ok(val) = env::var("BACKEND_SERVER_URL") {
            debug!("Applied env override: backend.base_url = {}", val);
            config.backend.base_url = val;
        }

        if let Ok(val) = env::var("GOOGLE_API_KEY") {
            if !val.trim().is_empty() {
                debug!("Applied env override: inference.api_key");
                config.inference.api_key = Some(val);
            }
        }

        if let Ok(val) = env::var("GOOGLE_MODEL") {
            debug!("Applied env override: inference.model = {}", val);
            config.inference.model = val;
        }

        if let Ok(val) = env::var("GOOGLE_TEMPERATURE") {
            match val.parse::<f32>() {
                Ok(temperature) => {
                    config.inference.temperature = temperature;
                    debug!("Applied env override: inference.temperature = {}", temperature);
                }
                Err(_) => warn!("Ignoring GOOGLE_TEMPERATURE={}: not a number", val),
            }
        }

        // Prefixed overrides
        if let Some(seconds) = self.parse_var::<u64>("BACKEND_TIMEOUT_SECONDS") {
            config.backend.timeout_seconds = seconds;
            debug!("Applied env override: backend.timeout_seconds = {}", seconds);
        }

        if let Some(seconds) = self.parse_var::<u64>("INFERENCE_TIMEOUT_SECONDS") {
            config.inference.timeout_seconds = seconds;
            debug!("Applied env override: inference.timeout_seconds = {}", seconds);
        }

        if let Some(retries) = self.parse_var::<usize>("MAX_RETRIES") {
            config.retry.max_retries = retries;
            debug!("Applied env override: retry.max_retries = {}", retries);
        }

        if let Ok(val) = env::var(format!("{}INFERENCE_PROVIDER", self.prefix)) {
            match val.to_lowercase().as_str() {
                "gemini" => config.inference.provider = super::InferenceProvider::Gemini,
                "stub" => config.inference.provider = super::InferenceProvider::Stub,
                other => warn!("Ignoring unknown inference provider '{}'", other),
            }
        }

        config
    }

    fn parse_var<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let name = format!("{}{}", self.prefix, key);
        let raw = env::var(&name).ok()?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring {}={}: cannot parse", name, raw);
                None
            }
        }
    }
}
