//! Skill-Proficiency Updater

pub mod updater;

pub use updater::{ProficiencyRule, ProficiencyUpdater};
