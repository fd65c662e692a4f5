//! Service entry points: one call per assignment or evaluation request.
//!
//! Each request fetches the catalog and roster fresh from the backend store;
//! nothing is cached between requests. Retrying is left to the caller.

pub mod assignment;
pub mod evaluation;

pub use assignment::{AssignmentOutcome, AssignmentService};
pub use evaluation::{EvaluationOutcome, EvaluationService};
