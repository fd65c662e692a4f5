//! # Evaluation Flow Tests
//!
//! Metrics and proficiency updates for resolved tickets, end to end.

use super::common::{backend, config_for, fixtures};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use ticket_router::catalog::CatalogClient;
use ticket_router::core::constants::messages;
use ticket_router::core::{RouterError, TicketPriority};
use ticket_router::inference::{InferenceClient, InferenceTask, ScriptedInference};
use ticket_router::service::EvaluationService;
use wiremock::MockServer;

const PERFORMANCE: &str = r#"```json
{"skills": {
  "Network Security": {"score": 90, "reasoning": "Found the blocking rule quickly"},
  "VoIP Troubleshooting": {"score": 70, "reasoning": "Needed help reading SIP traces"}
}}
```"#;

fn service(server: &MockServer, inference: Arc<ScriptedInference>) -> EvaluationService {
    let config = config_for(server);
    let catalog = Arc::new(CatalogClient::new(&config.backend).unwrap());
    let inference: Arc<dyn InferenceClient> = inference;
    EvaluationService::new(catalog, inference, &config)
}

fn score_of(update: &ticket_router::core::SkillUpdate, name: &str) -> f64 {
    update
        .skills
        .iter()
        .find(|s| s.skill_name == name)
        .map(|s| s.score)
        .unwrap()
}

#[tokio::test]
async fn test_resolution_within_sla_updates_skills() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillPerformance, PERFORMANCE),
    );

    let outcome = service(&server, inference.clone())
        .evaluate(&fixtures::resolved_ticket(TicketPriority::High, 125), 10)
        .await
        .unwrap();

    assert!(outcome.success);
    let metrics = outcome.metrics.unwrap();
    assert_eq!(metrics.resolution_time_minutes, 125);
    assert!(metrics.sla_adherence);
    assert_eq!(metrics.feedback_sentiment.score, 0.0);
    assert_eq!(metrics.feedback_sentiment.reasoning, messages::NO_FEEDBACK);
    assert_eq!(inference.calls_for(InferenceTask::Sentiment), 0);

    let update = outcome.skill_update.unwrap();
    assert_eq!(update.technician_id, 10);
    assert!((score_of(&update, "Network Security") - 83.0).abs() < 1e-9);
    assert!((score_of(&update, "VoIP Troubleshooting") - 70.0).abs() < 1e-9);
    assert_eq!(update.skills[0].skill_id, Some(1));
}

#[tokio::test]
async fn test_missed_sla_discounts_demonstrated_scores() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillPerformance, PERFORMANCE),
    );

    let outcome = service(&server, inference)
        .evaluate(&fixtures::resolved_ticket(TicketPriority::High, 300), 10)
        .await
        .unwrap();

    assert!(!outcome.metrics.unwrap().sla_adherence);
    let update = outcome.skill_update.unwrap();
    assert!((score_of(&update, "Network Security") - 77.6).abs() < 1e-9);
    assert!((score_of(&update, "VoIP Troubleshooting") - 56.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_feedback_sentiment_from_line_format() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new()
            .respond(InferenceTask::SkillPerformance, "no structured data here")
            .respond(
                InferenceTask::Sentiment,
                "SCORE: -40\nREASON: Requester had to chase for updates",
            ),
    );

    let mut ticket = fixtures::resolved_ticket(TicketPriority::Normal, 60);
    ticket.feedback = Some("Fixed eventually, but nobody kept me posted".to_string());

    let outcome = service(&server, inference)
        .evaluate(&ticket, 10)
        .await
        .unwrap();
    let metrics = outcome.metrics.unwrap();

    assert_eq!(metrics.feedback_sentiment.score, -40.0);
    assert_eq!(
        metrics.feedback_sentiment.reasoning,
        "Requester had to chase for updates"
    );
    // Unreadable skill output degrades to neutral scores
    assert_eq!(metrics.skill_metrics["Network Security"].score, 50.0);
    assert_eq!(
        metrics.skill_metrics["VoIP Troubleshooting"].reasoning,
        messages::SKILL_EVALUATION_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_unknown_technician_is_not_found() {
    let server = backend().await;
    let inference = Arc::new(ScriptedInference::new());

    let err = service(&server, inference.clone())
        .evaluate(&fixtures::resolved_ticket(TicketPriority::High, 30), 404)
        .await
        .unwrap_err();

    assert!(matches!(err, RouterError::NotFound { .. }));
    assert_eq!(inference.call_count(), 0);
}

#[tokio::test]
async fn test_inference_outage_propagates() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().fail(InferenceTask::SkillPerformance, "deadline exceeded"),
    );

    let err = service(&server, inference)
        .evaluate(&fixtures::resolved_ticket(TicketPriority::High, 30), 10)
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
