pub mod skill_match;
pub mod workload;

pub use skill_match::{skill_match, SkillMatch};
pub use workload::{workload_band, workload_score};
