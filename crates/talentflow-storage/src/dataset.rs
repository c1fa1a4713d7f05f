use serde::{Deserialize, Serialize};

use talentflow_core::models::assessment::Assessment;
use talentflow_core::models::assignment::AssessmentAssignment;
use talentflow_core::models::candidate::Candidate;
use talentflow_core::models::job::Job;
use talentflow_core::models::response::AssessmentResponse;
use talentflow_core::models::timeline::TimelineEntry;

use crate::error::StorageError;

/// Every table of the pipeline, as plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub timeline: Vec<TimelineEntry>,
    pub assessments: Vec<Assessment>,
    pub assignments: Vec<AssessmentAssignment>,
    pub responses: Vec<AssessmentResponse>,
}

impl Dataset {
    pub fn from_json(bytes: &[u8]) -> Result<Self, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
