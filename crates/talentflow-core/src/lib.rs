//! talentflow-core
//!
//! Pure domain types for the TalentFlow hiring pipeline: jobs, candidates,
//! assessments, responses, assignments and the candidate timeline.
//! No storage or UI dependency; this is the shared vocabulary of the system.

pub mod error;
pub mod models;
