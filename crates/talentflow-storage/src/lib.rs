//! talentflow-storage
//!
//! Storage collaborator seams for the assessment engine, plus an in-memory
//! reference backend used by the demo data set and tests.

pub mod dataset;
pub mod error;
pub mod memory;
pub mod store;
