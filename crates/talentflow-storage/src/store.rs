use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use talentflow_core::models::assessment::Assessment;
use talentflow_core::models::response::AssessmentResponse;
use talentflow_core::models::timeline::TimelineEntry;

use crate::error::StorageError;

/// Assessment table, keyed by owning job.
pub trait AssessmentStore {
    /// Load the assessment owned by `job_id`.
    fn load_assessment(&self, job_id: Uuid) -> Result<Assessment, StorageError>;

    /// Upsert keyed by `job_id`. An existing row keeps its id and
    /// `created_at`; the returned value is what was stored.
    fn save_assessment(&self, assessment: Assessment) -> Result<Assessment, StorageError>;

    fn list_assessments(&self) -> Result<Vec<Assessment>, StorageError>;
}

/// Response table. `save_response` is called once per accepted submission.
pub trait ResponseStore {
    fn save_response(&self, response: AssessmentResponse)
    -> Result<AssessmentResponse, StorageError>;

    fn responses_for(&self, assessment_id: Uuid) -> Result<Vec<AssessmentResponse>, StorageError>;
}

/// Receives informational candidate timeline events.
pub trait TimelineSink {
    fn record(&self, entry: TimelineEntry) -> Result<(), StorageError>;
}

/// An assessment enriched with assignment and submission counts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentSummary {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub registered_count: usize,
    pub attempted_count: usize,
}

impl AssessmentSummary {
    /// Share of registered candidates that submitted, as a 0–100 percentage.
    pub fn completion_rate(&self) -> u8 {
        if self.registered_count == 0 {
            return 0;
        }
        let rate = (self.attempted_count as f64 / self.registered_count as f64) * 100.0;
        rate.round().min(100.0) as u8
    }
}
