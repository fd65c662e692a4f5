use crate::core::types::Technician;

pub struct AvailabilityFilter;

impl AvailabilityFilter {
    /// Active technicians whose status allows taking new work.
    pub fn can_take_work<'a>(candidates: &[&'a Technician]) -> Vec<&'a Technician> {
        candidates
            .iter()
            .copied()
            .filter(|t| t.is_active && !t.availability.is_unavailable())
            .collect()
    }

    /// Available junior and mid-level technicians.
    pub fn training_pool<'a>(candidates: &[&'a Technician]) -> Vec<&'a Technician> {
        candidates
            .iter()
            .copied()
            .filter(|t| t.is_active && !t.skill_level.is_experienced() && t.availability.is_available())
            .collect()
    }
}
