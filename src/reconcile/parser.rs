use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::errors::{RouterError, RouterResult};
use crate::core::utils::preview;
use crate::inference::parsing::parse_value;
use crate::inference::InferenceTask;

/// A skill name proposed by the collaborator, before catalog reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSkill {
    pub name: String,
    pub description: Option<String>,
    /// What the collaborator claimed; the catalog has the final say.
    pub claimed_new: bool,
}

impl CandidateSkill {
    pub fn existing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            claimed_new: false,
        }
    }

    pub fn new_skill(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            claimed_new: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PrimaryShape {
    existing_skills: Vec<String>,
    #[serde(default)]
    new_skills: Vec<NamedDescription>,
}

#[derive(Debug, Deserialize)]
struct NamedDescription {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlternateShape {
    skills: Vec<FlaggedSkill>,
}

#[derive(Debug, Deserialize)]
struct FlaggedSkill {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_new: bool,
}

/// Parse the collaborator's skill-extraction output.
///
/// Tries `{existing_skills, new_skills}` first, then `{skills: [{name, description, is_new}]}`.
pub fn parse_extraction(raw: &str) -> RouterResult<Vec<CandidateSkill>> {
    let context = InferenceTask::SkillExtraction.as_str();
    let value = parse_value(context, raw)?;

    match serde_json::from_value::<PrimaryShape>(value.clone()) {
        Ok(primary) => Ok(from_primary(primary)),
        Err(primary_err) => {
            debug!("Primary skill schema rejected: {}", primary_err);
            parse_alternate(value).map_err(|alternate_err| {
                warn!(
                    "Skill extraction output matched neither schema: {}",
                    preview(raw, 300)
                );
                RouterError::malformed(
                    context,
                    format!("{primary_err}; alternate schema: {alternate_err}"),
                    raw,
                )
            })
        }
    }
}

fn from_primary(shape: PrimaryShape) -> Vec<CandidateSkill> {
    let mut out: Vec<CandidateSkill> = shape
        .existing_skills
        .into_iter()
        .map(CandidateSkill::existing)
        .collect();
    out.extend(shape.new_skills.into_iter().map(|n| CandidateSkill {
        name: n.name,
        description: n.description,
        claimed_new: true,
    }));
    out
}

fn parse_alternate(value: Value) -> Result<Vec<CandidateSkill>, serde_json::Error> {
    let shape: AlternateShape = serde_json::from_value(value)?;
    debug!("Normalized alternate skill schema ({} entries)", shape.skills.len());

    // Existing entries keep precedence over new ones, matching the primary layout.
    let (existing, new): (Vec<_>, Vec<_>) = shape.skills.into_iter().partition(|s| !s.is_new);
    Ok(existing
        .into_iter()
        .chain(new)
        .map(|s| CandidateSkill {
            name: s.name,
            description: s.description,
            claimed_new: s.is_new,
        })
        .collect())
}
