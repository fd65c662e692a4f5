//! Skill Reconciler: infer a ticket's skills and split them against the catalog.

pub mod parser;
pub mod partition;

pub use parser::{parse_extraction, CandidateSkill};
pub use partition::partition;

use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::errors::RouterResult;
use crate::core::types::{Skill, SkillMatchResult, Ticket};
use crate::inference::{prompts, InferenceClient, InferenceTask};

pub struct SkillReconciler {
    inference: Arc<dyn InferenceClient>,
}

impl SkillReconciler {
    pub fn new(inference: Arc<dyn InferenceClient>) -> Self {
        Self { inference }
    }

    #[instrument(skip_all, fields(subject = %ticket.subject))]
    pub async fn reconcile(&self, ticket: &Ticket, catalog: &[Skill]) -> RouterResult<SkillMatchResult> {
        ticket.validate()?;

        let names: Vec<String> = catalog
            .iter()
            .filter(|s| s.is_active && s.has_valid_name())
            .map(|s| s.name.clone())
            .collect();

        let prompt = prompts::skill_extraction(ticket, &names);
        let raw = self
            .inference
            .complete(InferenceTask::SkillExtraction, &prompt)
            .await?;

        let candidates = parse_extraction(&raw)?;
        let result = partition(&ticket.subject, candidates, catalog);

        info!(
            "Reconciled {} existing and {} new skills",
            result.existing_skills.len(),
            result.new_skills.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::RouterError;
    use crate::inference::MockInferenceClient;
    use mockall::predicate::eq;

    fn catalog() -> Vec<Skill> {
        vec![
            Skill::named("Network Security").with_id(1),
            Skill::named("Database Management").with_id(2),
        ]
    }

    #[tokio::test]
    async fn test_reconcile_partitions_collaborator_output() {
        let mut mock = MockInferenceClient::new();
        mock.expect_complete()
            .with(eq(InferenceTask::SkillExtraction), mockall::predicate::always())
            .times(1)
            .returning(|_, _| {
                Ok(r#"{"existing_skills": ["network security"], "new_skills": [{"name": "VoIP Troubleshooting", "description": "Call quality"}]}"#.to_string())
            });

        let reconciler = SkillReconciler::new(Arc::new(mock));
        let ticket = Ticket::new("Calls drop on VPN", "Softphone calls drop after VPN connects");
        let result = reconciler.reconcile(&ticket, &catalog()).await.unwrap();

        assert_eq!(result.existing_skills, vec!["Network Security".to_string()]);
        assert_eq!(result.new_skills[0].name, "VoIP Troubleshooting");
    }

    #[tokio::test]
    async fn test_invalid_ticket_skips_inference() {
        let mut mock = MockInferenceClient::new();
        mock.expect_complete().times(0);

        let reconciler = SkillReconciler::new(Arc::new(mock));
        let err = reconciler
            .reconcile(&Ticket::new("VPN", "broken"), &catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut mock = MockInferenceClient::new();
        mock.expect_complete()
            .returning(|_, _| Err(RouterError::upstream("inference provider", "timeout")));

        let reconciler = SkillReconciler::new(Arc::new(mock));
        let err = reconciler
            .reconcile(&Ticket::new("Printer jammed", "Paper stuck"), &catalog())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
