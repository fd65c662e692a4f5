use std::collections::HashSet;
use tracing::{debug, warn};

use super::parser::CandidateSkill;
use crate::core::types::{is_valid_skill_name, NewSkill, Skill, SkillMatchResult};
use crate::core::utils::skill_key;

/// Split candidates into catalog skills and new skills.
///
/// Catalog membership is decided here, case-insensitively, whatever the
/// collaborator claimed. Existing skills take the catalog's spelling.
pub fn partition(subject: &str, candidates: Vec<CandidateSkill>, catalog: &[Skill]) -> SkillMatchResult {
    let mut result = SkillMatchResult::default();
    let mut seen = HashSet::new();

    for candidate in candidates {
        let name = candidate.name.trim();
        if !is_valid_skill_name(name) {
            warn!("Dropping inferred skill with invalid name: {:?}", candidate.name);
            continue;
        }
        if !seen.insert(skill_key(name)) {
            continue;
        }

        match catalog.iter().find(|s| skill_key(&s.name) == skill_key(name)) {
            Some(known) => {
                if candidate.claimed_new {
                    debug!("'{}' is already in the catalog as '{}'", name, known.name);
                }
                result.existing_skills.push(known.name.clone());
            }
            None => {
                if !candidate.claimed_new {
                    debug!("'{}' is not in the catalog; treating it as new", name);
                }
                let description = candidate
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Skill identified from ticket: {}", subject.trim()));
                result.new_skills.push(NewSkill {
                    name: name.to_string(),
                    description,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<Skill> {
        vec![
            Skill::named("Network Security").with_id(1),
            Skill::named("Database Management").with_id(2),
        ]
    }

    #[test]
    fn test_case_insensitive_partition() {
        let result = partition(
            "Firewall blocks softphones",
            vec![
                CandidateSkill::existing("network security"),
                CandidateSkill::new_skill("VoIP Troubleshooting", "Softphone call setup"),
            ],
            &catalog(),
        );

        assert_eq!(result.existing_skills, vec!["Network Security".to_string()]);
        assert_eq!(
            result.new_skills,
            vec![NewSkill {
                name: "VoIP Troubleshooting".to_string(),
                description: "Softphone call setup".to_string(),
            }]
        );
    }

    #[test]
    fn test_catalog_overrides_collaborator_claims() {
        let result = partition(
            "Slow reports",
            vec![
                CandidateSkill::new_skill("DATABASE MANAGEMENT", "queries"),
                CandidateSkill::existing("Query Tuning"),
            ],
            &catalog(),
        );

        assert_eq!(result.existing_skills, vec!["Database Management".to_string()]);
        assert_eq!(result.new_skills[0].name, "Query Tuning");
        assert_eq!(
            result.new_skills[0].description,
            "Skill identified from ticket: Slow reports"
        );
    }

    #[test]
    fn test_duplicates_and_invalid_names_are_dropped() {
        let result = partition(
            "Login failures",
            vec![
                CandidateSkill::existing("Network Security"),
                CandidateSkill::existing(" network security "),
                CandidateSkill::existing("x"),
                CandidateSkill::new_skill("SSO", ""),
                CandidateSkill::new_skill("sso", "duplicate"),
                CandidateSkill::existing("a".repeat(256)),
            ],
            &catalog(),
        );

        assert_eq!(result.existing_skills, vec!["Network Security".to_string()]);
        assert_eq!(result.new_skills.len(), 1);
        assert_eq!(result.new_skills[0].description, "Skill identified from ticket: Login failures");
    }
}
