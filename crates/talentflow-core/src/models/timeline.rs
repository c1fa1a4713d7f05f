use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// An entry in a candidate's activity timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub change: String,
    pub timestamp: jiff::Timestamp,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TimelineKind {
    StageChange,
    Note,
    AssessmentSubmitted,
}

impl TimelineEntry {
    /// The entry recorded when a candidate submits an assessment.
    pub fn assessment_submitted(candidate_id: Uuid, timestamp: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate_id,
            change: "Assessment submitted".to_string(),
            timestamp,
            kind: TimelineKind::AssessmentSubmitted,
        }
    }
}
