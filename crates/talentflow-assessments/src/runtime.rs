use uuid::Uuid;

use talentflow_core::models::assessment::{Assessment, Question};
use talentflow_core::models::response::Answers;

use crate::collector::ResponseCollector;
use crate::error::SchemaError;
use crate::schema;
use crate::validation::{ValidationError, ValidatorSet};
use crate::visibility::{self, VisibilityMap};

/// A loaded assessment together with its validators, synthesized once.
///
/// The runtime is immutable and can back any number of independent
/// [`ResponseCollector`]s.
#[derive(Debug, Clone)]
pub struct AssessmentRuntime {
    assessment: Assessment,
    validators: ValidatorSet,
}

impl AssessmentRuntime {
    /// Check the schema, report lint warnings and synthesize validators.
    pub fn load(assessment: Assessment) -> Result<Self, SchemaError> {
        schema::check_schema(&assessment)?;
        for warning in schema::lint(&assessment) {
            tracing::warn!(assessment_id = %assessment.id, %warning, "assessment schema warning");
        }

        let validators = ValidatorSet::synthesize(&assessment);
        tracing::debug!(
            assessment_id = %assessment.id,
            questions = validators.len(),
            "assessment runtime loaded"
        );
        Ok(Self {
            assessment,
            validators,
        })
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    pub fn visibility(&self, answers: &Answers) -> VisibilityMap {
        visibility::visibility_map(&self.assessment, answers)
    }

    pub fn visible_questions(&self, answers: &Answers) -> Vec<&Question> {
        visibility::visible_questions(&self.assessment, answers)
    }

    /// Validate every visible question in canonical order and collect all
    /// failures. Hidden questions are skipped, required or not.
    pub fn validate(&self, answers: &Answers) -> Result<(), Vec<ValidationError>> {
        let visible = self.visibility(answers);
        let errors: Vec<ValidationError> = self
            .validators
            .iter()
            .filter(|v| visible.get(v.question_id()).copied().unwrap_or(false))
            .filter_map(|v| v.validate(answers.get(v.question_id())).err())
            .flatten()
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The subset of `answers` that belongs in a stored response: answers to
    /// visible questions, without `null`s.
    pub fn retained_answers(&self, answers: &Answers) -> Answers {
        let visible = self.visibility(answers);
        answers
            .iter()
            .filter(|(id, value)| {
                !value.is_null() && visible.get(id.as_str()).copied().unwrap_or(false)
            })
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    /// Start an isolated answer session for one candidate.
    pub fn collector(&self, candidate_id: Uuid) -> ResponseCollector<'_> {
        ResponseCollector::new(self, candidate_id)
    }
}
