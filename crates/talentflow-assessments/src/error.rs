use thiserror::Error;

use talentflow_core::error::CoreError;
use talentflow_storage::error::StorageError;

use crate::edit::{QuestionRef, SectionRef};
use crate::validation::ValidationError;

/// A malformed schema or schema edit.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("section not found: {0}")]
    SectionNotFound(SectionRef),

    #[error("question not found: {0}")]
    QuestionNotFound(QuestionRef),

    #[error("duplicate section id: {0}")]
    DuplicateSectionId(String),

    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(String),

    #[error("invalid question '{question_id}': {source}")]
    InvalidQuestion {
        question_id: String,
        #[source]
        source: CoreError,
    },

    #[error("question '{question_id}' depends on unknown question '{target}'")]
    DanglingReference { question_id: String, target: String },

    #[error("question '{0}' cannot depend on itself")]
    SelfReference(String),

    #[error("question '{question_id}' is a dependency of {dependents:?}")]
    QuestionReferenced {
        question_id: String,
        dependents: Vec<String>,
    },

    #[error("position {index} is out of range (len {len})")]
    PositionOutOfRange { index: usize, len: usize },
}

/// Failure while collecting or submitting a response.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("response already submitted")]
    AlreadySubmitted,

    #[error("submission rejected with {} validation error(s)", .0.len())]
    Rejected(Vec<ValidationError>),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
