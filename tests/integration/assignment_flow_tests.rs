//! # Assignment Flow Tests
//!
//! Full assignment requests against a wiremock backend store and a scripted
//! inference collaborator.

use super::common::{backend, config_for, fixtures};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use ticket_router::catalog::CatalogClient;
use ticket_router::core::constants::endpoints;
use ticket_router::core::{RouterError, TicketPriority};
use ticket_router::inference::{InferenceClient, InferenceTask, ScriptedInference};
use ticket_router::sanitize::JustificationFilter;
use ticket_router::service::AssignmentService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, inference: Arc<ScriptedInference>) -> AssignmentService {
    let config = config_for(server);
    let catalog = Arc::new(CatalogClient::new(&config.backend).unwrap());
    let inference: Arc<dyn InferenceClient> = inference;
    AssignmentService::new(catalog, inference, &config)
}

#[tokio::test]
async fn test_high_priority_picks_best_weighted_fit() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new()
            .respond(InferenceTask::SkillExtraction, fixtures::EXTRACTION)
            .respond(
                InferenceTask::Justification,
                r#"{"selected_technician_id": 10, "justification": "• Ada holds Network Security (80%)\n• Technician ID: 10 has a low current workload"}"#,
            ),
    );

    let outcome = service(&server, inference.clone())
        .assign(&fixtures::ticket(TicketPriority::High))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.selected_technician_id, Some(10));
    assert_eq!(outcome.technician_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(outcome.existing_skills, vec!["Network Security".to_string()]);
    assert_eq!(outcome.new_skills.len(), 1);
    assert_eq!(
        outcome.new_skills[0].description,
        "Skill identified from ticket: Firewall blocks VoIP calls"
    );
    assert!(JustificationFilter::is_clean(&outcome.justification));
    assert!(!outcome.justification.contains("80%"));
    assert!(!outcome.justification.contains("10"));

    // Inactive catalog skills are not offered to the collaborator
    let prompt = &inference.prompts_for(InferenceTask::SkillExtraction)[0];
    assert!(prompt.contains("Network Security"));
    assert!(!prompt.contains("Printer Support"));
    assert_eq!(inference.calls_for(InferenceTask::SpecialistMatch), 0);
}

#[tokio::test]
async fn test_extracted_skills_are_recorded_with_catalog_ids() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillExtraction, fixtures::EXTRACTION),
    );

    service(&server, inference)
        .assign(&fixtures::ticket(TicketPriority::Normal))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let recorded = requests
        .iter()
        .find(|r| r.url.path() == endpoints::PROCESS_TICKET_SKILLS)
        .expect("process-skills request");
    let body: Value = serde_json::from_slice(&recorded.body).unwrap();

    assert_eq!(body["ticket_id"], 501);
    assert_eq!(body["skills"][0]["id"], 1);
    assert_eq!(body["skills"][0]["name"], "Network Security");
    assert_eq!(body["skills"][1]["name"], "VoIP Troubleshooting");
    assert!(body["skills"][1].get("id").is_none());
}

#[tokio::test]
async fn test_critical_prefers_skill_match_over_workload() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillExtraction, fixtures::EXTRACTION),
    );

    let outcome = service(&server, inference.clone())
        .assign(&fixtures::ticket(TicketPriority::Critical))
        .await
        .unwrap();

    // Alan is busy and heavily loaded but holds the strongest matching skill
    assert_eq!(outcome.selected_technician_id, Some(11));
    assert_eq!(inference.calls_for(InferenceTask::SpecialistMatch), 1);
    assert!(outcome.justification.starts_with("• "));
}

#[tokio::test]
async fn test_low_priority_goes_to_available_junior() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillExtraction, fixtures::EXTRACTION),
    );

    let outcome = service(&server, inference)
        .assign(&fixtures::ticket(TicketPriority::Low))
        .await
        .unwrap();

    // Edsger scores higher but is at the end of his shift
    assert_eq!(outcome.selected_technician_id, Some(12));
}

#[tokio::test]
async fn test_process_skills_failure_does_not_block_assignment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoints::ALL_SKILLS))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::skills_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoints::ALL_TECHNICIANS))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::technicians_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(endpoints::PROCESS_TICKET_SKILLS))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let inference = Arc::new(
        ScriptedInference::new().respond(InferenceTask::SkillExtraction, fixtures::EXTRACTION),
    );
    let outcome = service(&server, inference)
        .assign(&fixtures::ticket(TicketPriority::High))
        .await
        .unwrap();
    assert_eq!(outcome.selected_technician_id, Some(10));
}

#[tokio::test]
async fn test_unreadable_extraction_is_malformed() {
    let server = backend().await;
    let inference = Arc::new(
        ScriptedInference::new()
            .respond(InferenceTask::SkillExtraction, "I think you need networking skills."),
    );

    let err = service(&server, inference)
        .assign(&fixtures::ticket(TicketPriority::High))
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::MalformedInferenceOutput { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_backend_outage_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoints::ALL_SKILLS))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service(&server, Arc::new(ScriptedInference::new()))
        .assign(&fixtures::ticket(TicketPriority::High))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
