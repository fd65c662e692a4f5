use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::constants::limits;
use super::errors::{RouterError, RouterResult};
use super::utils::skill_key;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    New,
    Assigned,
    InProgress,
    OnHold,
    Resolved,
    Closed,
    Cancelled,
}

/// Labels outside the known set deserialize to `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TicketPriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
    Unknown,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    /// Case-insensitive; `medium` is an alias for `normal`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "normal" | "medium" => Self::Normal,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for TicketPriority {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Junior,
    Mid,
    Senior,
    Expert,
}

impl SkillLevel {
    /// Senior and expert technicians count as experienced.
    pub fn is_experienced(&self) -> bool {
        matches!(self, Self::Senior | Self::Expert)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Junior => "junior technician",
            Self::Mid => "mid-level technician",
            Self::Senior => "senior specialist",
            Self::Expert => "experienced expert",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Busy,
    InMeeting,
    OnBreak,
    EndOfShift,
    FocusMode,
    Unavailable,
}

impl AvailabilityStatus {
    /// Statuses under which a technician cannot pick up new work at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::EndOfShift | Self::OnBreak)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Available => "currently available",
            Self::Busy => "currently busy",
            Self::InMeeting => "currently in a meeting",
            Self::OnBreak => "currently on a break",
            Self::EndOfShift => "at the end of their shift",
            Self::FocusMode => "currently in focus mode",
            Self::Unavailable => "currently unavailable",
        }
    }
}

/// A catalog skill, or a reference to one on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    pub is_active: bool,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: None,
            description: None,
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn has_valid_name(&self) -> bool {
        is_valid_skill_name(&self.name)
    }
}

pub fn is_valid_skill_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (limits::MIN_SKILL_NAME_LEN..=limits::MAX_SKILL_NAME_LEN).contains(&len)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkLog {
    #[serde(default)]
    pub technician_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub time_spent_minutes: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    #[serde(default)]
    pub id: Option<i64>,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub impact: ImpactLevel,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<Skill>,
    #[serde(default)]
    pub sla_violated: bool,
    #[serde(default)]
    pub escalation_count: u32,
    #[serde(default)]
    pub reopened_count: u32,
    #[serde(default)]
    pub requester_id: Option<i64>,
    #[serde(default)]
    pub assigned_technician_id: Option<i64>,
    #[serde(default)]
    pub work_logs: Vec<WorkLog>,
    #[serde(default)]
    pub satisfaction_rating: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_response_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution_due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            description: description.into(),
            status: TicketStatus::default(),
            priority: TicketPriority::default(),
            impact: ImpactLevel::default(),
            urgency: UrgencyLevel::default(),
            tags: Vec::new(),
            required_skills: Vec::new(),
            sla_violated: false,
            escalation_count: 0,
            reopened_count: 0,
            requester_id: None,
            assigned_technician_id: None,
            work_logs: Vec::new(),
            satisfaction_rating: None,
            feedback: None,
            created_at: None,
            first_response_time: None,
            resolution_due: None,
            resolved_at: None,
            closed_at: None,
        }
    }

    /// Check the intake invariants every flow relies on.
    pub fn validate(&self) -> RouterResult<()> {
        if self.subject.trim().chars().count() < limits::MIN_SUBJECT_LEN {
            return Err(RouterError::validation(
                "subject",
                format!("must be at least {} characters", limits::MIN_SUBJECT_LEN),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(RouterError::validation("description", "must not be empty"));
        }
        if let Some(rating) = self.satisfaction_rating {
            if !(1..=5).contains(&rating) {
                return Err(RouterError::validation(
                    "satisfaction_rating",
                    format!("{rating} is outside 1-5"),
                ));
            }
        }
        Ok(())
    }

    /// Feedback text, if any non-blank feedback was left.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// Subject, description and tags folded to lowercase for keyword checks.
    pub fn searchable_text(&self) -> String {
        let mut text = format!("{} {}", self.subject, self.description);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}

/// A technician's stored proficiency for one skill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicianSkillScore {
    #[serde(default)]
    pub skill_id: Option<i64>,
    pub skill_name: String,
    pub score: f64,
}

impl TechnicianSkillScore {
    pub fn new(skill_name: impl Into<String>, score: f64) -> Self {
        Self {
            skill_id: None,
            skill_name: skill_name.into(),
            score,
        }
    }

    pub fn with_id(mut self, skill_id: i64) -> Self {
        self.skill_id = Some(skill_id);
        self
    }

    /// Whether this entry refers to `skill`, by id when both carry one, otherwise by name.
    pub fn refers_to(&self, skill: &Skill) -> bool {
        match (self.skill_id, skill.id) {
            (Some(a), Some(b)) if a == b => true,
            _ => skill_key(&self.skill_name) == skill_key(&skill.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Technician {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Load as a fraction of capacity; values outside 0..=1 are clamped when scored.
    #[serde(default)]
    pub workload: f64,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub availability: AvailabilityStatus,
    #[serde(default)]
    pub current_tickets: u32,
    #[serde(default)]
    pub resolved_tickets: u32,
    #[serde(default)]
    pub total_tickets: u32,
    #[serde(default)]
    pub skills: Vec<TechnicianSkillScore>,
    #[serde(default)]
    pub experience: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Technician {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            contact_no: None,
            department: None,
            workload: 0.0,
            skill_level: SkillLevel::default(),
            availability: AvailabilityStatus::default(),
            current_tickets: 0,
            resolved_tickets: 0,
            total_tickets: 0,
            skills: Vec::new(),
            experience: 0.0,
            is_active: true,
        }
    }

    pub fn workload_fraction(&self) -> f64 {
        if self.workload.is_nan() {
            return 1.0;
        }
        self.workload.clamp(0.0, 1.0)
    }

    pub fn proficiency_in(&self, skill: &Skill) -> Option<f64> {
        self.skills
            .iter()
            .find(|s| s.refers_to(skill))
            .map(|s| s.score)
    }

    pub fn validate(&self) -> RouterResult<()> {
        if self.name.trim().chars().count() < 2 {
            return Err(RouterError::validation(
                "technician.name",
                "must be at least 2 characters",
            ));
        }
        if self.experience < 0.0 {
            return Err(RouterError::validation(
                "technician.experience",
                "must not be negative",
            ));
        }
        if let Some(bad) = self
            .skills
            .iter()
            .find(|s| !(0.0..=100.0).contains(&s.score))
        {
            return Err(RouterError::validation(
                "technician.skills",
                format!("score for '{}' is outside 0-100", bad.skill_name),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSkill {
    pub name: String,
    pub description: String,
}

/// Outcome of one reconciliation run against the skill catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SkillMatchResult {
    pub existing_skills: Vec<String>,
    pub new_skills: Vec<NewSkill>,
}

impl SkillMatchResult {
    pub fn is_empty(&self) -> bool {
        self.existing_skills.is_empty() && self.new_skills.is_empty()
    }

    /// Every reconciled skill as a ticket skill reference, catalog ids attached where known.
    pub fn as_required_skills(&self, catalog: &[Skill]) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .existing_skills
            .iter()
            .map(|name| {
                catalog
                    .iter()
                    .find(|c| skill_key(&c.name) == skill_key(name))
                    .cloned()
                    .unwrap_or_else(|| Skill::named(name.clone()))
            })
            .collect();
        skills.extend(self.new_skills.iter().map(|n| Skill {
            description: Some(n.description.clone()),
            ..Skill::named(n.name.clone())
        }));
        skills
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTier {
    /// Experienced specialists only; workload only breaks ties.
    Critical,
    /// Weighted suitability over every technician who can take work.
    Standard,
    /// Junior and mid-level technicians first, as a development opportunity.
    Training,
}

impl SelectionTier {
    pub fn for_priority(priority: TicketPriority) -> Self {
        match priority {
            TicketPriority::Critical => Self::Critical,
            TicketPriority::High | TicketPriority::Normal | TicketPriority::Unknown => Self::Standard,
            TicketPriority::Low => Self::Training,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SuitabilityScore {
    pub technician_id: i64,
    pub score: f64,
    pub skill_match_score: f64,
    pub workload_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentDecision {
    pub technician_id: Option<i64>,
    pub justification: String,
    pub tier: SelectionTier,
    pub fallback_used: bool,
    /// Every scored candidate, best first.
    #[serde(default)]
    pub ranking: Vec<SuitabilityScore>,
}

impl AssignmentDecision {
    pub fn none_found(tier: SelectionTier) -> Self {
        Self {
            technician_id: None,
            justification: super::constants::messages::NO_SUITABLE_TECHNICIAN.to_string(),
            tier,
            fallback_used: false,
            ranking: Vec::new(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.technician_id.is_some()
    }

    pub fn winning_score(&self) -> Option<&SuitabilityScore> {
        let id = self.technician_id?;
        self.ranking.iter().find(|s| s.technician_id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillMetric {
    pub score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsResult {
    pub resolution_time_minutes: i64,
    pub sla_adherence: bool,
    /// Keyed by skill name as it appears on the ticket.
    pub skill_metrics: BTreeMap<String, SkillMetric>,
    pub feedback_sentiment: SentimentResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillUpdate {
    pub technician_id: i64,
    pub skills: Vec<TechnicianSkillScore>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_accepts_medium_alias() {
        let priority: TicketPriority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(priority, TicketPriority::Normal);
        assert_eq!(SelectionTier::for_priority(priority), SelectionTier::Standard);
    }

    #[test]
    fn test_unrecognised_priority_is_accepted() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"subject": "Printer jammed", "description": "Floor 3 printer", "priority": "urgent"}"#,
        )
        .unwrap();
        assert_eq!(ticket.priority, TicketPriority::Unknown);
        assert_eq!(SelectionTier::for_priority(ticket.priority), SelectionTier::Standard);

        let shouted: TicketPriority = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(shouted, TicketPriority::High);
    }

    #[test]
    fn test_ticket_subject_length_is_enforced() {
        let ticket = Ticket::new("VPN", "Cannot connect to the VPN from home");
        assert!(matches!(
            ticket.validate(),
            Err(RouterError::Validation { ref field, .. }) if field == "subject"
        ));
        assert!(Ticket::new("VPN drops", "Cannot connect").validate().is_ok());
    }

    #[test]
    fn test_ticket_deserializes_with_defaults() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"subject": "Printer jammed", "description": "Floor 3 printer", "priority": "high"}"#,
        )
        .unwrap();
        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.status, TicketStatus::New);
        assert!(ticket.tags.is_empty());
        assert!(ticket.feedback_text().is_none());
    }

    #[test]
    fn test_workload_fraction_clamps() {
        let mut tech = Technician::new(1, "Ada");
        tech.workload = 1.7;
        assert_eq!(tech.workload_fraction(), 1.0);
        tech.workload = -0.2;
        assert_eq!(tech.workload_fraction(), 0.0);
        tech.workload = f64::NAN;
        assert_eq!(tech.workload_fraction(), 1.0);
    }

    #[test]
    fn test_skill_score_matches_by_id_or_name() {
        let score = TechnicianSkillScore::new("Network Security", 80.0).with_id(4);
        assert!(score.refers_to(&Skill::named("network security")));
        assert!(score.refers_to(&Skill::named("Firewalls").with_id(4)));
        assert!(!score.refers_to(&Skill::named("Firewalls").with_id(5)));
    }

    #[test]
    fn test_availability_classification() {
        assert!(AvailabilityStatus::EndOfShift.is_unavailable());
        assert!(!AvailabilityStatus::Busy.is_unavailable());
        assert!(!AvailabilityStatus::Busy.is_available());
        assert!(SkillLevel::Expert.is_experienced());
        assert!(!SkillLevel::Mid.is_experienced());
    }
}
