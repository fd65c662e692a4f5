use std::collections::HashSet;

use crate::core::types::{Skill, Technician, Ticket};
use crate::core::utils::skill_key;

pub struct SpecialistFilter;

impl SpecialistFilter {
    /// Technicians whose skills relate to the ticket's core issue.
    ///
    /// With required skills, a specialist holds at least one of them. Without,
    /// one of the technician's skill names must appear in the ticket text.
    pub fn deterministic(ticket: &Ticket, required: &[Skill], candidates: &[&Technician]) -> HashSet<i64> {
        let text = ticket.searchable_text();
        candidates
            .iter()
            .filter(|t| {
                if required.is_empty() {
                    t.skills.iter().any(|s| {
                        let key = skill_key(&s.skill_name);
                        !key.is_empty() && text.contains(&key)
                    })
                } else {
                    required.iter().any(|r| t.proficiency_in(r).is_some())
                }
            })
            .map(|t| t.id)
            .collect()
    }

    /// Experienced technicians from `candidates` that are in `specialists`.
    pub fn experienced<'a>(candidates: &[&'a Technician], specialists: &HashSet<i64>) -> Vec<&'a Technician> {
        candidates
            .iter()
            .copied()
            .filter(|t| t.is_active && t.skill_level.is_experienced() && specialists.contains(&t.id))
            .collect()
    }
}
