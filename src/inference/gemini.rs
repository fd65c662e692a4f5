//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{InferenceClient, InferenceTask};
use crate::core::config::InferenceConfig;
use crate::core::constants::services;
use crate::core::errors::{RouterError, RouterResult};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: InferenceConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

impl GeminiClient {
    pub fn new(config: InferenceConfig) -> RouterResult<Self> {
        if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(RouterError::validation(
                "inference.api_key",
                "required for the gemini provider",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RouterError::from_http(services::INFERENCE, &e))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            }),
        }
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn complete(&self, task: InferenceTask, prompt: &str) -> RouterResult<String> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        debug!(task = %task, model = %self.config.model, "Sending prompt to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| RouterError::from_http(services::INFERENCE, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RouterError::from_http(services::INFERENCE, &e))?;

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, body);
            return Err(RouterError::upstream(
                services::INFERENCE,
                format!("HTTP {status}"),
            ));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            RouterError::malformed(task.as_str(), format!("unreadable provider envelope: {e}"), &body)
        })?;

        if let Some(usage) = &parsed.usage_metadata {
            info!(
                "Gemini usage - prompt: {:?}, response: {:?}, total: {:?} tokens",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(RouterError::malformed(task.as_str(), "empty completion", body));
        }
        Ok(text)
    }
}
