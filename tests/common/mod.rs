//! Shared fixtures for integration tests: a backend store served by wiremock
//! and tickets in the shapes the CLI accepts.

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use ticket_router::core::config::BackendConfig;
use ticket_router::core::constants::endpoints;
use ticket_router::core::{RouterConfig, Skill, Ticket, TicketPriority};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub mod fixtures {
    use super::*;

    pub fn skills_body() -> Value {
        json!({
            "success": true,
            "data": {"skills": [
                {"id": 1, "name": "Network Security", "category": "Security"},
                {"id": 2, "name": "Database Management", "category": "Data"},
                {"id": 3, "name": "Printer Support", "isActive": false}
            ]}
        })
    }

    pub fn technicians_body() -> Value {
        json!({
            "success": true,
            "data": {"technicians": [
                {
                    "id": 10, "name": "Ada Lovelace", "workload": 20,
                    "technicianLevel": "senior", "availabilityStatus": "available",
                    "technicianSkills": [{"score": 80, "skill": {"id": 1, "name": "Network Security"}}]
                },
                {
                    "id": 11, "name": "Alan Turing", "workload": 90,
                    "technicianLevel": "expert", "availabilityStatus": "busy",
                    "technicianSkills": [{"score": 95, "skill": {"id": 1, "name": "Network Security"}}]
                },
                {
                    "id": 12, "name": "Grace Hopper", "workload": 10,
                    "technicianLevel": "junior", "availabilityStatus": "available",
                    "technicianSkills": [{"score": 40, "skill": {"id": 1, "name": "Network Security"}}]
                },
                {
                    "id": 13, "name": "Edsger Dijkstra", "workload": 0,
                    "technicianLevel": "mid", "availabilityStatus": "end_of_shift",
                    "technicianSkills": [{"score": 99, "skill": {"id": 1, "name": "Network Security"}}]
                }
            ]}
        })
    }

    pub const EXTRACTION: &str = r#"```json
{
  "existing_skills": ["network security"],
  "new_skills": [{"name": "VoIP Troubleshooting", "description": ""}]
}
```"#;

    pub fn ticket(priority: TicketPriority) -> Ticket {
        let mut ticket = Ticket::new(
            "Firewall blocks VoIP calls",
            "Desk phones lose audio since this morning's firewall update",
        );
        ticket.id = Some(501);
        ticket.priority = priority;
        ticket.tags = vec!["voip".to_string(), "firewall".to_string()];
        ticket
    }

    /// A resolved ticket, `minutes` after creation.
    pub fn resolved_ticket(priority: TicketPriority, minutes: i64) -> Ticket {
        let created = Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap();
        let mut ticket = ticket(priority);
        ticket.required_skills = vec![
            Skill::named("Network Security").with_id(1),
            Skill::named("VoIP Troubleshooting"),
        ];
        ticket.created_at = Some(created);
        ticket.resolved_at = Some(created + Duration::minutes(minutes));
        ticket
    }
}

/// Serve the skill catalog, the roster and the process-skills endpoint.
pub async fn backend() -> MockServer {
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
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    server
}

pub fn config_for(server: &MockServer) -> RouterConfig {
    RouterConfig {
        backend: BackendConfig {
            base_url: server.uri(),
            timeout_seconds: 2,
        },
        ..RouterConfig::testing()
    }
}
