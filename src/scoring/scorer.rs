use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::algorithms::{skill_match, workload_band, workload_score};
use super::filters::{AvailabilityFilter, SpecialistFilter};
use super::formatter::render_justification;
use super::types::{ScoringWeights, Selection, SelectionSummary};
use crate::core::types::{
    AssignmentDecision, SelectionTier, Skill, SuitabilityScore, Technician, Ticket,
};
use crate::core::utils::dedup_by_skill_key;
use crate::sanitize::JustificationFilter;

/// Priority-tiered technician selection.
#[derive(Debug, Clone, Default)]
pub struct TechnicianScorer {
    weights: ScoringWeights,
}

struct Ranked<'a> {
    technician: &'a Technician,
    score: SuitabilityScore,
    matched: Vec<String>,
    missing: Vec<String>,
}

impl TechnicianScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Choose a technician for `ticket`.
    ///
    /// `specialists` overrides the deterministic specialist rule for critical
    /// tickets; ids outside `candidates` are ignored.
    pub fn select(
        &self,
        ticket: &Ticket,
        required_skills: &[Skill],
        candidates: &[Technician],
        specialists: Option<&HashSet<i64>>,
    ) -> AssignmentDecision {
        self.evaluate(ticket, required_skills, candidates, specialists)
            .decision
    }

    /// Like [`select`](Self::select), also returning the summary of the winning computation.
    pub fn evaluate(
        &self,
        ticket: &Ticket,
        required_skills: &[Skill],
        candidates: &[Technician],
        specialists: Option<&HashSet<i64>>,
    ) -> Selection {
        let requested = SelectionTier::for_priority(ticket.priority);
        let required = dedup_by_skill_key(required_skills.to_vec(), |s| s.name.as_str());
        let active: Vec<&Technician> = candidates.iter().filter(|t| t.is_active).collect();

        if active.is_empty() {
            warn!("No active technicians to choose from");
            return no_selection(requested);
        }

        let (tier, fallback_used, ranked) = match requested {
            SelectionTier::Critical => {
                let specialist_ids = match specialists {
                    Some(ids) => ids.clone(),
                    None => SpecialistFilter::deterministic(ticket, &required, &active),
                };
                let pool = SpecialistFilter::experienced(&active, &specialist_ids);
                if pool.is_empty() {
                    info!("No experienced specialist matched; falling back to standard scoring");
                    let pool = AvailabilityFilter::can_take_work(&active);
                    (SelectionTier::Standard, true, self.rank_standard(&required, &pool))
                } else {
                    (SelectionTier::Critical, false, self.rank_critical(&required, &pool))
                }
            }
            SelectionTier::Standard => (
                SelectionTier::Standard,
                false,
                self.rank_standard(&required, &AvailabilityFilter::can_take_work(&active)),
            ),
            SelectionTier::Training => {
                let pool = AvailabilityFilter::training_pool(&active);
                if pool.is_empty() {
                    info!("No available junior or mid-level technician; scoring the wider team");
                    let pool = AvailabilityFilter::can_take_work(&active);
                    (SelectionTier::Standard, true, self.rank_standard(&required, &pool))
                } else {
                    (SelectionTier::Training, false, self.rank_standard(&required, &pool))
                }
            }
        };

        let Some(winner) = ranked.first() else {
            warn!(tier = ?tier, "No technician survived the selection filters");
            return no_selection(tier);
        };

        let summary = SelectionSummary {
            technician_name: winner.technician.name.clone(),
            skill_level: winner.technician.skill_level,
            availability: winner.technician.availability,
            workload_band: workload_band(winner.technician.workload_fraction()).to_string(),
            matched_skills: winner.matched.clone(),
            missing_skills: winner.missing.clone(),
            tier,
            requested_tier: requested,
            fallback_used,
        };

        info!(
            technician_id = winner.technician.id,
            tier = ?tier,
            fallback_used,
            score = winner.score.score,
            "Selected technician"
        );

        let decision = AssignmentDecision {
            technician_id: Some(winner.technician.id),
            justification: JustificationFilter::clean(&render_justification(&summary, ticket.priority)),
            tier,
            fallback_used,
            ranking: ranked.iter().map(|r| r.score).collect(),
        };

        Selection {
            decision,
            summary: Some(summary),
        }
    }

    fn score<'a>(&self, required: &[Skill], technician: &'a Technician) -> Ranked<'a> {
        let skills = skill_match(required, technician);
        let workload = workload_score(technician);
        let score = self.weights.skill_match * skills.score + self.weights.workload * workload;
        debug!(
            technician_id = technician.id,
            skill_match = skills.score,
            workload_score = workload,
            score,
            "Scored technician"
        );

        Ranked {
            technician,
            score: SuitabilityScore {
                technician_id: technician.id,
                score,
                skill_match_score: skills.score,
                workload_score: workload,
            },
            matched: skills.matched,
            missing: skills.missing,
        }
    }

    /// Highest suitability first; lower workload then lower id break ties.
    fn rank_standard<'a>(&self, required: &[Skill], pool: &[&'a Technician]) -> Vec<Ranked<'a>> {
        let mut ranked: Vec<Ranked<'a>> = pool.iter().map(|t| self.score(required, *t)).collect();
        ranked.sort_by(|a, b| {
            b.score
                .score
                .total_cmp(&a.score.score)
                .then_with(|| by_workload_then_id(a, b))
        });
        ranked
    }

    /// Best skill match first; workload only breaks ties.
    fn rank_critical<'a>(&self, required: &[Skill], pool: &[&'a Technician]) -> Vec<Ranked<'a>> {
        let mut ranked: Vec<Ranked<'a>> = pool.iter().map(|t| self.score(required, *t)).collect();
        ranked.sort_by(|a, b| {
            b.score
                .skill_match_score
                .total_cmp(&a.score.skill_match_score)
                .then_with(|| by_workload_then_id(a, b))
        });
        ranked
    }
}

fn by_workload_then_id(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    a.technician
        .workload_fraction()
        .total_cmp(&b.technician.workload_fraction())
        .then_with(|| a.technician.id.cmp(&b.technician.id))
}

fn no_selection(tier: SelectionTier) -> Selection {
    Selection {
        decision: AssignmentDecision::none_found(tier),
        summary: None,
    }
}
