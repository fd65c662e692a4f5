//! Technician Scorer
//!
//! Suitability is `skill_weight * skill_match + workload_weight * (1 - workload)`.
//! Which technicians are scored, and how they are ordered, depends on the tier
//! the ticket's priority selects:
//!
//! - **Critical**: experienced specialists only, best skill match first, workload as tie-break
//! - **Standard** (high, normal): everyone able to take work, highest suitability first
//! - **Training** (low): available junior and mid-level technicians, highest suitability first
//!
//! Critical and Training fall back to Standard when their pool is empty.

pub mod algorithms;
pub mod filters;
pub mod formatter;
pub mod scorer;
pub mod types;

pub use formatter::render_justification;
pub use scorer::TechnicianScorer;
pub use types::{ScoringWeights, Selection, SelectionSummary};
