//! talentflow-seed
//!
//! Deterministic sample data for the dashboard. Every generator owns its own
//! seeded RNG; there is no process-wide random state, so the same seed and
//! config always produce the same data set.

pub mod config;
pub mod error;
pub mod generator;
mod words;

pub use config::SeedConfig;
pub use generator::SeedGenerator;
