use serde_json::Value;
use uuid::Uuid;

use talentflow_core::models::assessment::Question;
use talentflow_core::models::response::{Answers, AssessmentResponse};
use talentflow_core::models::timeline::TimelineEntry;
use talentflow_storage::store::{ResponseStore, TimelineSink};

use crate::error::CollectError;
use crate::runtime::AssessmentRuntime;
use crate::validation::ValidationError;

/// Where a collector is in its lifecycle.
///
/// `Editing → (submit) → Rejected(errors) → (edit) → Editing`, or
/// `Editing → (submit) → Submitted`. `Submitted` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectorState {
    Editing,
    Rejected(Vec<ValidationError>),
    Submitted(AssessmentResponse),
}

/// Accumulates one candidate's answers and turns them into a response.
pub struct ResponseCollector<'a> {
    runtime: &'a AssessmentRuntime,
    candidate_id: Uuid,
    answers: Answers,
    state: CollectorState,
}

impl<'a> ResponseCollector<'a> {
    pub(crate) fn new(runtime: &'a AssessmentRuntime, candidate_id: Uuid) -> Self {
        Self {
            runtime,
            candidate_id,
            answers: Answers::new(),
            state: CollectorState::Editing,
        }
    }

    pub fn candidate_id(&self) -> Uuid {
        self.candidate_id
    }

    pub fn state(&self) -> &CollectorState {
        &self.state
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&Value> {
        self.answers.get(question_id)
    }

    /// Record an answer. Any edit returns a rejected collector to `Editing`.
    pub fn set_answer(
        &mut self,
        question_id: impl Into<String>,
        value: Value,
    ) -> Result<(), CollectError> {
        self.ensure_editable()?;
        let question_id = question_id.into();
        if self.runtime.assessment().find_question(&question_id).is_none() {
            return Err(CollectError::UnknownQuestion(question_id));
        }
        self.answers.insert(question_id, value);
        self.state = CollectorState::Editing;
        Ok(())
    }

    pub fn clear_answer(&mut self, question_id: &str) -> Result<Option<Value>, CollectError> {
        self.ensure_editable()?;
        if self.runtime.assessment().find_question(question_id).is_none() {
            return Err(CollectError::UnknownQuestion(question_id.to_string()));
        }
        let previous = self.answers.remove(question_id);
        self.state = CollectorState::Editing;
        Ok(previous)
    }

    /// Questions to render for the current answers.
    pub fn visible_questions(&self) -> Vec<&'a Question> {
        let runtime: &'a AssessmentRuntime = self.runtime;
        runtime.visible_questions(&self.answers)
    }

    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        self.runtime.validate(&self.answers)
    }

    /// Validate and, if everything passes, hand a new response to `store`.
    pub fn submit(
        &mut self,
        store: &dyn ResponseStore,
    ) -> Result<AssessmentResponse, CollectError> {
        self.submit_inner(store, None)
    }

    /// Like [`submit`](Self::submit), then record an `assessment-submitted`
    /// timeline entry. A failing timeline does not fail the submission.
    pub fn submit_and_notify(
        &mut self,
        store: &dyn ResponseStore,
        timeline: &dyn TimelineSink,
    ) -> Result<AssessmentResponse, CollectError> {
        self.submit_inner(store, Some(timeline))
    }

    fn submit_inner(
        &mut self,
        store: &dyn ResponseStore,
        timeline: Option<&dyn TimelineSink>,
    ) -> Result<AssessmentResponse, CollectError> {
        self.ensure_editable()?;
        let assessment_id = self.runtime.assessment().id;

        if let Err(errors) = self.runtime.validate(&self.answers) {
            tracing::info!(
                %assessment_id,
                candidate_id = %self.candidate_id,
                errors = errors.len(),
                "submission rejected"
            );
            self.state = CollectorState::Rejected(errors.clone());
            return Err(CollectError::Rejected(errors));
        }

        let submitted_at = jiff::Timestamp::now();
        let response = AssessmentResponse {
            id: Uuid::new_v4(),
            assessment_id,
            candidate_id: self.candidate_id,
            responses: self.runtime.retained_answers(&self.answers),
            submitted_at,
        };

        let stored = match store.save_response(response) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(
                    %assessment_id,
                    candidate_id = %self.candidate_id,
                    error = %e,
                    "failed to store response"
                );
                self.state = CollectorState::Editing;
                return Err(e.into());
            }
        };

        let entry = TimelineEntry::assessment_submitted(self.candidate_id, submitted_at);
        if let Some(timeline) = timeline
            && let Err(e) = timeline.record(entry)
        {
            tracing::warn!(
                candidate_id = %self.candidate_id,
                error = %e,
                "timeline notification failed"
            );
        }

        tracing::info!(
            %assessment_id,
            candidate_id = %self.candidate_id,
            response_id = %stored.id,
            "assessment submitted"
        );
        self.state = CollectorState::Submitted(stored.clone());
        Ok(stored)
    }

    fn ensure_editable(&self) -> Result<(), CollectError> {
        match self.state {
            CollectorState::Submitted(_) => Err(CollectError::AlreadySubmitted),
            CollectorState::Editing | CollectorState::Rejected(_) => Ok(()),
        }
    }
}
