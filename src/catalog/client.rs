use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::records::{
    Acknowledgement, Envelope, ProcessSkillsRequest, ProcessedSkill, SkillsData, TechniciansData,
};
use super::CatalogStore;
use crate::core::config::BackendConfig;
use crate::core::constants::{endpoints, services};
use crate::core::errors::{RouterError, RouterResult};
use crate::core::types::{Skill, Technician};

/// HTTP client for the backend store's catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &BackendConfig) -> RouterResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RouterError::from_http(services::BACKEND, &e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RouterResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouterError::from_http(services::BACKEND, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::upstream(
                services::BACKEND,
                format!("GET {} returned HTTP {}", path, status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RouterError::from_http(services::BACKEND, &e))?;

        serde_json::from_slice::<T>(&body).map_err(|e| {
            RouterError::malformed_response(services::BACKEND, format!("{}: {}", path, e))
        })
    }
}

#[async_trait]
impl CatalogStore for CatalogClient {
    async fn fetch_skills(&self) -> RouterResult<Vec<Skill>> {
        let envelope: Envelope<SkillsData> = self.get_json(endpoints::ALL_SKILLS).await?;
        let total = envelope.data.skills.len();

        let skills: Vec<Skill> = envelope
            .data
            .skills
            .into_iter()
            .filter_map(|record| {
                let raw = format!("{:?}", record.name);
                let skill = record.into_skill();
                if skill.is_none() {
                    warn!("Skipping invalid skill record: {}", raw);
                }
                skill
            })
            .collect();

        info!("Fetched {} skills from backend ({} records)", skills.len(), total);
        Ok(skills)
    }

    async fn fetch_technicians(&self) -> RouterResult<Vec<Technician>> {
        let envelope: Envelope<TechniciansData> =
            self.get_json(endpoints::ALL_TECHNICIANS).await?;

        let technicians: Vec<Technician> = envelope
            .data
            .technicians
            .into_iter()
            .filter_map(|record| record.into_technician())
            .collect();

        info!("Fetched {} technicians from backend", technicians.len());
        Ok(technicians)
    }

    async fn record_ticket_skills(
        &self,
        ticket_id: Option<i64>,
        skills: &[Skill],
    ) -> RouterResult<bool> {
        let body = ProcessSkillsRequest {
            ticket_id,
            skills: skills.iter().map(ProcessedSkill::from).collect(),
        };

        let response = self
            .client
            .post(self.url(endpoints::PROCESS_TICKET_SKILLS))
            .json(&body)
            .send()
            .await
            .map_err(|e| RouterError::from_http(services::BACKEND, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::upstream(
                services::BACKEND,
                format!("process-skills returned HTTP {}", status),
            ));
        }

        let ack: Acknowledgement = response.json().await.unwrap_or(Acknowledgement { success: false });
        if !ack.success {
            warn!("Backend did not acknowledge skill processing");
        }
        Ok(ack.success)
    }
}
