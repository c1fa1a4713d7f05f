use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Links a candidate to an assessment they were invited to take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentAssignment {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_id: Uuid,
    pub status: AssignmentStatus,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssignmentStatus {
    Invited,
    Registered,
    Started,
    Submitted,
}

impl AssignmentStatus {
    /// Whether the candidate has at least registered for the assessment.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Invited)
    }
}
