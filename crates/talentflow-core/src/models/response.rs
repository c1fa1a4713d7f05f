use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Answers keyed by question id.
pub type Answers = BTreeMap<String, serde_json::Value>;

/// One candidate's finalized, validated answers to an assessment.
/// Immutable once created; a resubmission is always a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_id: Uuid,
    pub responses: Answers,
    pub submitted_at: jiff::Timestamp,
}
