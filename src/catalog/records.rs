//! Wire shapes served by the backend store and their conversion into domain types.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::{
    AvailabilityStatus, Skill, SkillLevel, Technician, TechnicianSkillScore,
};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct SkillsData {
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TechniciansData {
    #[serde(default)]
    pub technicians: Vec<TechnicianRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    pub is_active: bool,
}

impl SkillRecord {
    /// Records without a usable name are dropped.
    pub fn into_skill(self) -> Option<Skill> {
        let name = self.name?.trim().to_string();
        let skill = Skill {
            id: self.id,
            name,
            category: self.category,
            description: self.description,
            is_active: self.is_active,
        };
        skill.has_valid_name().then_some(skill)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillRefRecord {
    #[serde(default)]
    pub score: f64,
    pub skill: SkillInfoRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInfoRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "contact_no")]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "current_tickets")]
    pub current_tickets: u32,
    #[serde(default, alias = "resolved_tickets")]
    pub resolved_tickets: u32,
    #[serde(default, alias = "total_tickets")]
    pub total_tickets: u32,
    /// Percentage of capacity in use, 0-100.
    #[serde(default)]
    pub workload: f64,
    #[serde(default, alias = "technician_level", alias = "skillLevel")]
    pub technician_level: SkillLevel,
    #[serde(default, alias = "availability_status")]
    pub availability_status: AvailabilityStatus,
    #[serde(default = "default_true", alias = "is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub experience: f64,
    #[serde(default, alias = "skills")]
    pub technician_skills: Vec<SkillRefRecord>,
}

impl TechnicianRecord {
    /// Convert to the domain form; workload becomes a 0-1 fraction.
    pub fn into_technician(self) -> Option<Technician> {
        let Some(id) = self.id else {
            warn!("Skipping technician record without id: {}", self.name);
            return None;
        };

        let skills = self
            .technician_skills
            .into_iter()
            .map(|r| TechnicianSkillScore {
                skill_id: r.skill.id,
                skill_name: r.skill.name,
                score: r.score.clamp(0.0, 100.0),
            })
            .collect();

        let technician = Technician {
            id,
            name: self.name,
            email: self.email,
            contact_no: self.contact_no,
            department: self.department,
            workload: (self.workload / 100.0).clamp(0.0, 1.0),
            skill_level: self.technician_level,
            availability: self.availability_status,
            current_tickets: self.current_tickets,
            resolved_tickets: self.resolved_tickets,
            total_tickets: self.total_tickets,
            skills,
            experience: self.experience.max(0.0),
            is_active: self.is_active,
        };

        match technician.validate() {
            Ok(()) => Some(technician),
            Err(err) => {
                warn!("Skipping technician record {}: {}", id, err);
                None
            }
        }
    }
}

/// One entry of the process-skills notification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessedSkill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Skill> for ProcessedSkill {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.clone(),
            description: skill.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessSkillsRequest {
    pub ticket_id: Option<i64>,
    pub skills: Vec<ProcessedSkill>,
}

#[derive(Debug, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
}

fn default_true() -> bool {
    true
}
