//! Fixed values shared across the decision engine.
//!
//! Tunable coefficients have configurable counterparts in [`crate::core::config`];
//! the values here are their defaults.

/// Resolution targets in minutes by priority
pub mod sla_minutes {
    pub const CRITICAL: i64 = 60;
    pub const HIGH: i64 = 240;
    pub const NORMAL: i64 = 480;
    pub const LOW: i64 = 1440;
    pub const DEFAULT: i64 = 480;
}

/// Suitability score weights
pub mod weights {
    pub const SKILL_MATCH: f64 = 0.6;
    pub const WORKLOAD: f64 = 0.4;
}

/// Proficiency update coefficients
pub mod proficiency {
    pub const RETENTION: f64 = 0.7;
    pub const GAIN: f64 = 0.3;
    pub const MISSED_SLA_MULTIPLIER: f64 = 0.8;
    pub const MAX_SCORE: f64 = 100.0;
}

/// Neutral values used when the inference collaborator cannot be interpreted
pub mod neutral {
    pub const SKILL_SCORE: f64 = 50.0;
    pub const SENTIMENT_SCORE: f64 = 0.0;
    pub const SENTIMENT_MIN: f64 = -100.0;
    pub const SENTIMENT_MAX: f64 = 100.0;
}

pub mod limits {
    pub const MIN_SUBJECT_LEN: usize = 5;
    pub const MIN_SKILL_NAME_LEN: usize = 2;
    pub const MAX_SKILL_NAME_LEN: usize = 255;
}

/// User-facing messages
pub mod messages {
    pub const NO_SUITABLE_TECHNICIAN: &str = "no suitable technician found";
    pub const NO_FEEDBACK: &str = "no feedback provided";
    pub const SENTIMENT_UNPARSEABLE: &str = "unable to interpret feedback sentiment";
    pub const SKILL_EVALUATION_UNAVAILABLE: &str = "evaluation unavailable";
    pub const SKILLS_RECORDED: &str = "Skills successfully extracted and sent to backend.";
}

/// Backend store endpoints, relative to the configured base URL
pub mod endpoints {
    pub const ALL_SKILLS: &str = "/api/v1/skills/all";
    pub const ALL_TECHNICIANS: &str = "/api/v1/technicians/all";
    pub const PROCESS_TICKET_SKILLS: &str = "/api/v1/tickets/process-skills";
}

/// Service names used in upstream errors and log fields
pub mod services {
    pub const BACKEND: &str = "backend store";
    pub const INFERENCE: &str = "inference provider";
}
