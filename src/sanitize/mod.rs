//! Presentation rules for text shown to end users.

pub mod justification_filter;

pub use justification_filter::JustificationFilter;
