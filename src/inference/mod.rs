//! The inference collaborator: text in, text out, behind [`InferenceClient`].
//!
//! Everything that interprets the returned text lives with the caller; this
//! module only provides transport, prompt construction and the shared
//! fence-stripping and JSON parsing helpers.

pub mod gemini;
pub mod parsing;
pub mod prompts;
pub mod stub;

pub use gemini::GeminiClient;
pub use stub::ScriptedInference;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::core::config::{InferenceConfig, InferenceProvider};
use crate::core::errors::RouterResult;

/// What a completion request is for, used for logging and by scripted clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceTask {
    SkillExtraction,
    SpecialistMatch,
    Justification,
    SkillPerformance,
    Sentiment,
}

impl InferenceTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkillExtraction => "skill extraction",
            Self::SpecialistMatch => "specialist match",
            Self::Justification => "justification",
            Self::SkillPerformance => "skill performance",
            Self::Sentiment => "feedback sentiment",
        }
    }
}

impl fmt::Display for InferenceTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, task: InferenceTask, prompt: &str) -> RouterResult<String>;
}

/// Build the configured client.
///
/// A Gemini provider without an API key degrades to an empty scripted client,
/// so every call reports the provider as unavailable and local fallbacks apply.
pub fn build_client(config: &InferenceConfig) -> RouterResult<Arc<dyn InferenceClient>> {
    match config.provider {
        InferenceProvider::Gemini => match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                Ok(Arc::new(GeminiClient::new(config.clone())?))
            }
            _ => {
                info!("No inference API key configured; running without inference");
                Ok(Arc::new(ScriptedInference::new()))
            }
        },
        InferenceProvider::Stub => Ok(Arc::new(ScriptedInference::new())),
    }
}
