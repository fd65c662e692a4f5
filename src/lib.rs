//! # ticket-router
//!
//! Decision engine for routing IT-support tickets to technicians and feeding
//! resolution outcomes back into technician proficiency scores.
//!
//! ## Flows
//!
//! - **Assignment**: infer the ticket's skills, reconcile them against the
//!   backend skill catalog, then pick a technician with a priority-tiered
//!   scorer and explain the choice in plain English
//! - **Evaluation**: compute resolution time, SLA adherence, demonstrated
//!   skill levels and feedback sentiment for a resolved ticket, and blend
//!   them into the technician's stored proficiencies
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ticket_router::catalog::CatalogClient;
//! use ticket_router::core::RouterConfig;
//! use ticket_router::inference;
//! use ticket_router::service::AssignmentService;
//!
//! # async fn run(ticket: ticket_router::core::Ticket) -> Result<(), Box<dyn std::error::Error>> {
//! let config = RouterConfig::default();
//! let catalog = Arc::new(CatalogClient::new(&config.backend)?);
//! let inference = inference::build_client(&config.inference)?;
//!
//! let outcome = AssignmentService::new(catalog, inference, &config)
//!     .assign(&ticket)
//!     .await?;
//! println!("{:?}", outcome.selected_technician_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`core`] - Domain types, errors, configuration and retry
//! - [`catalog`] - Backend store client
//! - [`inference`] - Inference collaborator seam, Gemini client and scripted stub
//! - [`reconcile`] - Skill Reconciler
//! - [`scoring`] - Technician Scorer
//! - [`sanitize`] - Justification presentation filter
//! - [`metrics`] - Metrics Calculator
//! - [`proficiency`] - Skill-Proficiency Updater
//! - [`service`] - Assignment and evaluation entry points
//! - [`cli`] - Command-line interface

/// Backend store client for the skill catalog and technician roster
pub mod catalog;
/// Command-line interface and argument parsing
pub mod cli;
/// Core types, errors, configuration and retry
pub mod core;
/// Inference collaborator: transport, prompts and response parsing
pub mod inference;
/// Resolution metrics for closed tickets
pub mod metrics;
/// Proficiency updates from ticket outcomes
pub mod proficiency;
/// Skill extraction and catalog reconciliation
pub mod reconcile;
/// Removal of identifiers and scores from user-facing text
pub mod sanitize;
/// Priority-tiered technician selection
pub mod scoring;
/// Assignment and evaluation entry points
pub mod service;

pub use crate::core::{RouterConfig, RouterError, RouterResult};
pub use cli::{run_cli, Cli};
pub use service::{AssignmentOutcome, AssignmentService, EvaluationOutcome, EvaluationService};
