use chrono::Utc;
use tracing::{debug, warn};

use crate::core::config::ProficiencyConfig;
use crate::core::constants::proficiency;
use crate::core::types::{MetricsResult, SkillUpdate, TechnicianSkillScore};
use crate::core::utils::skill_key;

/// Coefficients of the weighted-average update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProficiencyRule {
    pub retention: f64,
    pub gain: f64,
    pub missed_sla_multiplier: f64,
}

impl Default for ProficiencyRule {
    fn default() -> Self {
        Self {
            retention: proficiency::RETENTION,
            gain: proficiency::GAIN,
            missed_sla_multiplier: proficiency::MISSED_SLA_MULTIPLIER,
        }
    }
}

impl From<&ProficiencyConfig> for ProficiencyRule {
    fn from(config: &ProficiencyConfig) -> Self {
        Self {
            retention: config.retention,
            gain: config.gain,
            missed_sla_multiplier: config.missed_sla_multiplier,
        }
    }
}

impl ProficiencyRule {
    pub fn performance_multiplier(&self, sla_adherence: bool) -> f64 {
        if sla_adherence {
            1.0
        } else {
            self.missed_sla_multiplier
        }
    }

    /// Score for a skill the technician already had.
    pub fn blend(&self, current: f64, demonstrated: f64, multiplier: f64) -> f64 {
        bound(current * self.retention + demonstrated * self.gain * multiplier)
    }

    /// Starting score for a skill first demonstrated on this ticket.
    pub fn initial(&self, demonstrated: f64, multiplier: f64) -> f64 {
        bound(demonstrated * multiplier)
    }
}

fn bound(score: f64) -> f64 {
    score.min(proficiency::MAX_SCORE).max(0.0)
}

#[derive(Debug, Clone, Default)]
pub struct ProficiencyUpdater {
    rule: ProficiencyRule,
}

impl ProficiencyUpdater {
    pub fn new(rule: ProficiencyRule) -> Self {
        Self { rule }
    }

    /// Apply one resolved ticket's metrics to a technician's skill scores.
    ///
    /// Skills absent from the metrics pass through unchanged and in order;
    /// skills the technician did not have are appended.
    pub fn update(
        &self,
        technician_id: i64,
        current: &[TechnicianSkillScore],
        metrics: &MetricsResult,
    ) -> SkillUpdate {
        let multiplier = self.rule.performance_multiplier(metrics.sla_adherence);
        let mut skills: Vec<TechnicianSkillScore> = current.to_vec();

        for (name, metric) in &metrics.skill_metrics {
            if !metric.score.is_finite() {
                warn!(skill = %name, "Ignoring non-finite demonstrated score");
                continue;
            }
            let key = skill_key(name);
            match skills.iter_mut().find(|s| skill_key(&s.skill_name) == key) {
                Some(existing) => {
                    let updated = self.rule.blend(existing.score, metric.score, multiplier);
                    debug!(
                        skill = %name,
                        from = existing.score,
                        to = updated,
                        "Updated skill proficiency"
                    );
                    existing.score = updated;
                }
                None => {
                    let initial = self.rule.initial(metric.score, multiplier);
                    debug!(skill = %name, score = initial, "Added skill proficiency");
                    skills.push(TechnicianSkillScore::new(name.clone(), initial));
                }
            }
        }

        SkillUpdate {
            technician_id,
            skills,
            updated_at: Utc::now(),
        }
    }
}
