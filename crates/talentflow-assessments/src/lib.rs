//! talentflow-assessments
//!
//! The assessment definition and response engine. Pure data in, pure data
//! out: schema edits, validator synthesis, conditional visibility and the
//! response collector that hands finished responses to a storage collaborator.

pub mod collector;
pub mod edit;
pub mod error;
pub mod runtime;
pub mod schema;
pub mod validation;
pub mod visibility;

pub use collector::{CollectorState, ResponseCollector};
pub use runtime::AssessmentRuntime;
pub use validation::{ValidationCode, ValidationError, ValidatorSet};
