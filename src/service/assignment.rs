use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::core::config::RouterConfig;
use crate::core::errors::{RouterError, RouterResult};
use crate::core::types::{
    AssignmentDecision, NewSkill, SelectionTier, Skill, SkillMatchResult, Technician, Ticket,
};
use crate::core::utils::preview;
use crate::inference::parsing::parse_json;
use crate::inference::{prompts, InferenceClient, InferenceTask};
use crate::reconcile::SkillReconciler;
use crate::sanitize::JustificationFilter;
use crate::scoring::{ScoringWeights, Selection, SelectionSummary, TechnicianScorer};

/// Structured result of one assignment request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentOutcome {
    pub success: bool,
    pub selected_technician_id: Option<i64>,
    pub technician_name: Option<String>,
    pub justification: String,
    #[serde(default)]
    pub existing_skills: Vec<String>,
    #[serde(default)]
    pub new_skills: Vec<NewSkill>,
    pub error_message: Option<String>,
}

impl AssignmentOutcome {
    pub fn failed(err: &RouterError) -> Self {
        Self {
            success: false,
            selected_technician_id: None,
            technician_name: None,
            justification: String::new(),
            existing_skills: Vec::new(),
            new_skills: Vec::new(),
            error_message: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpecialistReply {
    #[serde(default)]
    specialist_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct JustificationReply {
    #[serde(default)]
    selected_technician_id: Option<i64>,
    justification: String,
}

/// Catalog fetch, reconciliation, roster fetch and tiered selection for one ticket.
pub struct AssignmentService {
    catalog: Arc<dyn CatalogStore>,
    inference: Arc<dyn InferenceClient>,
    reconciler: SkillReconciler,
    scorer: TechnicianScorer,
}

impl AssignmentService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        inference: Arc<dyn InferenceClient>,
        config: &RouterConfig,
    ) -> Self {
        Self {
            catalog,
            reconciler: SkillReconciler::new(inference.clone()),
            inference,
            scorer: TechnicianScorer::new(ScoringWeights::from(&config.scoring)),
        }
    }

    /// Assign `ticket` to a technician.
    ///
    /// Finding nobody suitable is a successful outcome with no technician.
    pub async fn assign(&self, ticket: &Ticket) -> RouterResult<AssignmentOutcome> {
        let request_id = Uuid::new_v4();
        let span = info_span!("assign", %request_id, ticket_id = ?ticket.id, priority = %ticket.priority);
        self.assign_inner(ticket).instrument(span).await
    }

    async fn assign_inner(&self, ticket: &Ticket) -> RouterResult<AssignmentOutcome> {
        ticket.validate()?;

        let catalog = self.catalog.fetch_skills().await?;
        debug!("Fetched {} catalog skills", catalog.len());

        let reconciled = self.reconciler.reconcile(ticket, &catalog).await?;
        let required = reconciled.as_required_skills(&catalog);
        self.record_skills(ticket, &required).await;

        let roster = self.catalog.fetch_technicians().await?;
        debug!("Fetched {} technicians", roster.len());

        let specialists = if SelectionTier::for_priority(ticket.priority) == SelectionTier::Critical {
            self.match_specialists(ticket, &required, &roster).await
        } else {
            None
        };

        let Selection { decision, summary } =
            self.scorer.evaluate(ticket, &required, &roster, specialists.as_ref());

        let justification = match (&decision.technician_id, &summary) {
            (Some(id), Some(summary)) => self.justify(ticket, *id, summary, &decision).await,
            _ => decision.justification.clone(),
        };

        let technician_name = summary.map(|s| s.technician_name);
        info!(
            technician_id = ?decision.technician_id,
            tier = ?decision.tier,
            fallback_used = decision.fallback_used,
            "Assignment complete"
        );

        Ok(outcome(decision, technician_name, justification, reconciled))
    }

    async fn record_skills(&self, ticket: &Ticket, skills: &[Skill]) {
        if skills.is_empty() {
            return;
        }
        match self.catalog.record_ticket_skills(ticket.id, skills).await {
            Ok(true) => debug!("Recorded {} ticket skills", skills.len()),
            Ok(false) => warn!("Backend store did not acknowledge ticket skills"),
            Err(err) => warn!("Failed to record ticket skills: {}", err),
        }
    }

    /// Ask the inference collaborator which technicians specialise in the ticket's core issue.
    ///
    /// `None` means the deterministic specialist rule applies.
    async fn match_specialists(
        &self,
        ticket: &Ticket,
        required: &[Skill],
        roster: &[Technician],
    ) -> Option<HashSet<i64>> {
        let candidates: Vec<Technician> = roster
            .iter()
            .filter(|t| t.is_active && t.skill_level.is_experienced())
            .cloned()
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let prompt = prompts::specialist_match(ticket, required, &candidates);
        let raw = match self
            .inference
            .complete(InferenceTask::SpecialistMatch, &prompt)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Specialist matching unavailable, using skill overlap: {}", err);
                return None;
            }
        };

        match parse_json::<SpecialistReply>(InferenceTask::SpecialistMatch.as_str(), &raw) {
            Ok(reply) => {
                let known: HashSet<i64> = candidates.iter().map(|t| t.id).collect();
                let ids: HashSet<i64> = reply
                    .specialist_ids
                    .into_iter()
                    .filter(|id| known.contains(id))
                    .collect();
                debug!("Inference named {} specialists", ids.len());
                Some(ids)
            }
            Err(err) => {
                warn!("Ignoring specialist reply: {}", err);
                None
            }
        }
    }

    async fn justify(
        &self,
        ticket: &Ticket,
        technician_id: i64,
        summary: &SelectionSummary,
        decision: &AssignmentDecision,
    ) -> String {
        let local = &decision.justification;
        let prompt = prompts::justification(ticket, technician_id, summary);

        let raw = match self
            .inference
            .complete(InferenceTask::Justification, &prompt)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Justification unavailable, using local rendering: {}", err);
                return JustificationFilter::sanitize_or(local, local);
            }
        };

        match parse_json::<JustificationReply>(InferenceTask::Justification.as_str(), &raw) {
            Ok(reply) => {
                if let Some(chosen) = reply.selected_technician_id {
                    if chosen != technician_id {
                        warn!(
                            suggested = chosen,
                            selected = technician_id,
                            "Inference suggested a different technician; keeping the scored choice"
                        );
                    }
                }
                JustificationFilter::sanitize_or(&reply.justification, local)
            }
            Err(err) => {
                error!(raw = %preview(&raw, 200), "Unreadable justification: {}", err);
                JustificationFilter::sanitize_or(local, local)
            }
        }
    }
}

fn outcome(
    decision: AssignmentDecision,
    technician_name: Option<String>,
    justification: String,
    reconciled: SkillMatchResult,
) -> AssignmentOutcome {
    AssignmentOutcome {
        success: true,
        selected_technician_id: decision.technician_id,
        technician_name,
        justification,
        existing_skills: reconciled.existing_skills,
        new_skills: reconciled.new_skills,
        error_message: None,
    }
}
