use crate::core::types::{Skill, Technician};

/// How well a technician covers a ticket's required skills.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    /// `(matched / required) * (average matched proficiency / 100)`, in [0, 1]
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub fn skill_match(required: &[Skill], technician: &Technician) -> SkillMatch {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total_proficiency = 0.0;

    for skill in required {
        match technician.proficiency_in(skill) {
            Some(score) => {
                total_proficiency += score.clamp(0.0, 100.0);
                matched.push(skill.name.clone());
            }
            None => missing.push(skill.name.clone()),
        }
    }

    let score = if required.is_empty() || matched.is_empty() {
        0.0
    } else {
        let coverage = matched.len() as f64 / required.len() as f64;
        let average = total_proficiency / matched.len() as f64;
        coverage * (average / 100.0)
    };

    SkillMatch {
        score,
        matched,
        missing,
    }
}
