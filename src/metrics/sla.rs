use chrono::{DateTime, Utc};

use crate::core::config::SlaConfig;
use crate::core::types::TicketPriority;

/// Resolution targets in minutes by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaTargets {
    pub critical: i64,
    pub high: i64,
    pub normal: i64,
    pub low: i64,
    pub default: i64,
}

impl Default for SlaTargets {
    fn default() -> Self {
        Self::from(&SlaConfig::default())
    }
}

impl From<&SlaConfig> for SlaTargets {
    fn from(config: &SlaConfig) -> Self {
        Self {
            critical: config.critical_minutes,
            high: config.high_minutes,
            normal: config.normal_minutes,
            low: config.low_minutes,
            default: config.default_minutes,
        }
    }
}

impl SlaTargets {
    pub fn target_for(&self, priority: TicketPriority) -> i64 {
        match priority {
            TicketPriority::Critical => self.critical,
            TicketPriority::High => self.high,
            TicketPriority::Normal => self.normal,
            TicketPriority::Low => self.low,
            TicketPriority::Unknown => self.default,
        }
    }
}

/// Whole minutes from creation to resolution, never negative; 0 when either is missing.
pub fn resolution_minutes(created_at: Option<DateTime<Utc>>, resolved_at: Option<DateTime<Utc>>) -> i64 {
    match (created_at, resolved_at) {
        (Some(created), Some(resolved)) => (resolved - created).num_minutes().max(0),
        _ => 0,
    }
}
