//! Metrics Calculator: resolution time, SLA adherence, demonstrated skill
//! levels and feedback sentiment for a resolved ticket.

pub mod calculator;
pub mod parsing;
pub mod sla;

pub use calculator::MetricsCalculator;
pub use sla::{resolution_minutes, SlaTargets};
