use serde::{Deserialize, Serialize};

use crate::core::config::ScoringConfig;
use crate::core::constants::weights;
use crate::core::types::{AssignmentDecision, AvailabilityStatus, SelectionTier, SkillLevel};

/// Weights of the two suitability components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub workload: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_match: weights::SKILL_MATCH,
            workload: weights::WORKLOAD,
        }
    }
}

impl From<&ScoringConfig> for ScoringWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            skill_match: config.skill_weight,
            workload: config.workload_weight,
        }
    }
}

/// Human-readable facts about the winning technician, free of identifiers and scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionSummary {
    pub technician_name: String,
    pub skill_level: SkillLevel,
    pub availability: AvailabilityStatus,
    pub workload_band: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tier: SelectionTier,
    /// The tier the ticket's priority asked for, before any fallback.
    pub requested_tier: SelectionTier,
    pub fallback_used: bool,
}

impl SelectionSummary {
    pub fn basis(&self) -> &'static str {
        match (self.requested_tier, self.fallback_used) {
            (SelectionTier::Critical, false) => {
                "critical ticket routed to an experienced specialist for the core issue"
            }
            (SelectionTier::Critical, true) => {
                "critical ticket; no experienced specialist matched, so the best overall fit was chosen"
            }
            (SelectionTier::Training, false) => {
                "lower-priority ticket offered to a developing technician as a training opportunity"
            }
            (SelectionTier::Training, true) => {
                "lower-priority ticket; no junior or mid-level technician was available, so the wider team was considered"
            }
            (SelectionTier::Standard, _) => {
                "best overall fit on skills and current workload among technicians able to take work"
            }
        }
    }
}

/// A decision plus the summary used to explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub decision: AssignmentDecision,
    pub summary: Option<SelectionSummary>,
}
