use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::core::config::RouterConfig;
use crate::core::errors::{RouterError, RouterResult};
use crate::core::types::{MetricsResult, SkillUpdate, Ticket};
use crate::inference::InferenceClient;
use crate::metrics::{MetricsCalculator, SlaTargets};
use crate::proficiency::{ProficiencyRule, ProficiencyUpdater};

/// Structured result of one skill-evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationOutcome {
    pub success: bool,
    pub metrics: Option<MetricsResult>,
    pub skill_update: Option<SkillUpdate>,
    pub error_message: Option<String>,
}

impl EvaluationOutcome {
    pub fn failed(err: &RouterError) -> Self {
        Self {
            success: false,
            metrics: None,
            skill_update: None,
            error_message: Some(err.to_string()),
        }
    }
}

/// Metrics for a resolved ticket and the resulting proficiency update.
pub struct EvaluationService {
    catalog: Arc<dyn CatalogStore>,
    calculator: MetricsCalculator,
    updater: ProficiencyUpdater,
}

impl EvaluationService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        inference: Arc<dyn InferenceClient>,
        config: &RouterConfig,
    ) -> Self {
        Self {
            catalog,
            calculator: MetricsCalculator::new(inference, SlaTargets::from(&config.sla)),
            updater: ProficiencyUpdater::new(ProficiencyRule::from(&config.proficiency)),
        }
    }

    pub async fn evaluate(&self, ticket: &Ticket, technician_id: i64) -> RouterResult<EvaluationOutcome> {
        let request_id = Uuid::new_v4();
        let span = info_span!("evaluate", %request_id, ticket_id = ?ticket.id, technician_id);
        self.evaluate_inner(ticket, technician_id).instrument(span).await
    }

    async fn evaluate_inner(&self, ticket: &Ticket, technician_id: i64) -> RouterResult<EvaluationOutcome> {
        ticket.validate()?;

        let roster = self.catalog.fetch_technicians().await?;
        let technician = roster
            .into_iter()
            .find(|t| t.id == technician_id)
            .ok_or_else(|| RouterError::not_found("technician", technician_id))?;

        let metrics = self.calculator.compute(ticket).await?;
        let skill_update = self.updater.update(technician.id, &technician.skills, &metrics);

        info!(
            sla_adherence = metrics.sla_adherence,
            skills_updated = metrics.skill_metrics.len(),
            "Evaluation complete"
        );

        Ok(EvaluationOutcome {
            success: true,
            metrics: Some(metrics),
            skill_update: Some(skill_update),
            error_message: None,
        })
    }
}
