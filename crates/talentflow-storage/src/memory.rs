use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use talentflow_core::models::assessment::Assessment;
use talentflow_core::models::assignment::AssessmentAssignment;
use talentflow_core::models::response::AssessmentResponse;
use talentflow_core::models::timeline::TimelineEntry;

use crate::dataset::Dataset;
use crate::error::StorageError;
use crate::store::{AssessmentStore, AssessmentSummary, ResponseStore, TimelineSink};

/// In-process backend holding every table in memory. Last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        tracing::debug!(
            jobs = dataset.jobs.len(),
            candidates = dataset.candidates.len(),
            assessments = dataset.assessments.len(),
            "memory store loaded from dataset"
        );
        Self {
            tables: Mutex::new(dataset),
        }
    }

    /// Copy of every table.
    pub fn snapshot(&self) -> Result<Dataset, StorageError> {
        Ok(self.lock()?.clone())
    }

    pub fn timeline_for(&self, candidate_id: Uuid) -> Result<Vec<TimelineEntry>, StorageError> {
        let mut entries: Vec<_> = self
            .lock()?
            .timeline
            .iter()
            .filter(|e| e.candidate_id == candidate_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    pub fn add_assignment(&self, assignment: AssessmentAssignment) -> Result<(), StorageError> {
        let mut tables = self.lock()?;
        if tables.assignments.iter().any(|a| a.id == assignment.id) {
            return Err(StorageError::Duplicate {
                key: format!("assignments/{}", assignment.id),
            });
        }
        tables.assignments.push(assignment);
        Ok(())
    }

    pub fn assignments_for(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<AssessmentAssignment>, StorageError> {
        Ok(self
            .lock()?
            .assignments
            .iter()
            .filter(|a| a.assessment_id == assessment_id)
            .cloned()
            .collect())
    }

    /// The job's assessment with its registered and attempted counts.
    pub fn summary(&self, job_id: Uuid) -> Result<AssessmentSummary, StorageError> {
        let tables = self.lock()?;
        let assessment = find_by_job(&tables, job_id)?.clone();
        Ok(summarize(&tables, assessment))
    }

    pub fn summaries(&self) -> Result<Vec<AssessmentSummary>, StorageError> {
        let tables = self.lock()?;
        Ok(tables
            .assessments
            .iter()
            .map(|a| summarize(&tables, a.clone()))
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Dataset>, StorageError> {
        self.tables.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn find_by_job(tables: &Dataset, job_id: Uuid) -> Result<&Assessment, StorageError> {
    tables
        .assessments
        .iter()
        .find(|a| a.job_id == job_id)
        .ok_or_else(|| StorageError::NotFound {
            key: format!("assessments/{job_id}"),
        })
}

fn summarize(tables: &Dataset, assessment: Assessment) -> AssessmentSummary {
    let registered_count = tables
        .assignments
        .iter()
        .filter(|a| a.assessment_id == assessment.id && a.status.is_registered())
        .count();
    let attempted_count = tables
        .responses
        .iter()
        .filter(|r| r.assessment_id == assessment.id)
        .count();
    AssessmentSummary {
        assessment,
        registered_count,
        attempted_count,
    }
}

impl AssessmentStore for MemoryStore {
    fn load_assessment(&self, job_id: Uuid) -> Result<Assessment, StorageError> {
        let tables = self.lock()?;
        find_by_job(&tables, job_id).cloned()
    }

    fn save_assessment(&self, mut assessment: Assessment) -> Result<Assessment, StorageError> {
        let mut tables = self.lock()?;
        let now = jiff::Timestamp::now();
        assessment.updated_at = now;

        match tables
            .assessments
            .iter_mut()
            .find(|a| a.job_id == assessment.job_id)
        {
            Some(existing) => {
                assessment.id = existing.id;
                assessment.created_at = existing.created_at;
                *existing = assessment.clone();
                tracing::info!(
                    job_id = %assessment.job_id,
                    id = %assessment.id,
                    "assessment updated"
                );
            }
            None => {
                assessment.created_at = now;
                tables.assessments.push(assessment.clone());
                tracing::info!(
                    job_id = %assessment.job_id,
                    id = %assessment.id,
                    "assessment created"
                );
            }
        }
        Ok(assessment)
    }

    fn list_assessments(&self) -> Result<Vec<Assessment>, StorageError> {
        Ok(self.lock()?.assessments.clone())
    }
}

impl ResponseStore for MemoryStore {
    fn save_response(
        &self,
        response: AssessmentResponse,
    ) -> Result<AssessmentResponse, StorageError> {
        let mut tables = self.lock()?;
        if tables.responses.iter().any(|r| r.id == response.id) {
            return Err(StorageError::Duplicate {
                key: format!("responses/{}", response.id),
            });
        }
        tables.responses.push(response.clone());
        tracing::debug!(
            id = %response.id,
            assessment_id = %response.assessment_id,
            "response stored"
        );
        Ok(response)
    }

    fn responses_for(&self, assessment_id: Uuid) -> Result<Vec<AssessmentResponse>, StorageError> {
        Ok(self
            .lock()?
            .responses
            .iter()
            .filter(|r| r.assessment_id == assessment_id)
            .cloned()
            .collect())
    }
}

impl TimelineSink for MemoryStore {
    fn record(&self, entry: TimelineEntry) -> Result<(), StorageError> {
        self.lock()?.timeline.push(entry);
        Ok(())
    }
}
