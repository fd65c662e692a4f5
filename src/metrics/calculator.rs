use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::parsing;
use super::sla::{resolution_minutes, SlaTargets};
use crate::core::constants::{messages, neutral};
use crate::core::errors::RouterResult;
use crate::core::types::{MetricsResult, SentimentResult, SkillMetric, Ticket};
use crate::core::utils::dedup_by_skill_key;
use crate::inference::{prompts, InferenceClient, InferenceTask};

pub struct MetricsCalculator {
    inference: Arc<dyn InferenceClient>,
    sla: SlaTargets,
}

impl MetricsCalculator {
    pub fn new(inference: Arc<dyn InferenceClient>, sla: SlaTargets) -> Self {
        Self { inference, sla }
    }

    /// Metrics for a resolved ticket.
    ///
    /// Unreadable collaborator output degrades to neutral scores; an
    /// unavailable collaborator is reported as an error.
    #[instrument(skip_all, fields(ticket_id = ?ticket.id))]
    pub async fn compute(&self, ticket: &Ticket) -> RouterResult<MetricsResult> {
        let resolution_time_minutes = resolution_minutes(ticket.created_at, ticket.resolved_at);
        let target = self.sla.target_for(ticket.priority);
        let sla_adherence = resolution_time_minutes <= target;

        let (skills, sentiment) = tokio::join!(self.skill_metrics(ticket), self.sentiment(ticket));
        let skill_metrics = skills?;
        let feedback_sentiment = sentiment?;

        info!(
            resolution_time_minutes,
            sla_target_minutes = target,
            sla_adherence,
            skills_evaluated = skill_metrics.len(),
            "Computed ticket metrics"
        );

        Ok(MetricsResult {
            resolution_time_minutes,
            sla_adherence,
            skill_metrics,
            feedback_sentiment,
        })
    }

    async fn skill_metrics(&self, ticket: &Ticket) -> RouterResult<BTreeMap<String, SkillMetric>> {
        let names: Vec<String> = dedup_by_skill_key(
            ticket
                .required_skills
                .iter()
                .filter(|s| s.has_valid_name())
                .map(|s| s.name.trim().to_string())
                .collect(),
            |s| s.as_str(),
        );
        if names.is_empty() {
            return Ok(BTreeMap::new());
        }

        let prompt = prompts::skill_performance(ticket, &names);
        match self.inference.complete(InferenceTask::SkillPerformance, &prompt).await {
            Ok(raw) => Ok(parsing::skill_metrics(&raw, &names)),
            Err(err) if err.is_retryable() => Err(err),
            Err(err) => {
                warn!("Skill evaluation failed, using neutral scores: {}", err);
                Ok(names
                    .into_iter()
                    .map(|name| (name, parsing::neutral_skill()))
                    .collect())
            }
        }
    }

    async fn sentiment(&self, ticket: &Ticket) -> RouterResult<SentimentResult> {
        let Some(feedback) = ticket.feedback_text() else {
            return Ok(SentimentResult {
                score: neutral::SENTIMENT_SCORE,
                reasoning: messages::NO_FEEDBACK.to_string(),
            });
        };

        let prompt = prompts::sentiment(feedback);
        match self.inference.complete(InferenceTask::Sentiment, &prompt).await {
            Ok(raw) => Ok(parsing::sentiment(&raw)),
            Err(err) if err.is_retryable() => Err(err),
            Err(err) => {
                warn!("Sentiment analysis failed, using neutral score: {}", err);
                Ok(parsing::unparseable_sentiment())
            }
        }
    }
}
