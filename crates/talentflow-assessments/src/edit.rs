//! Builder edits.
//!
//! Every operation takes the current assessment by reference and returns a
//! new assessment reflecting exactly one edit. The input is never mutated.
//! The result is re-checked with [`schema::check_schema`] and
//! [`schema::check_references_except`] before it is returned, so an edit can
//! never produce duplicate ids, broken variant constraints or new dangling
//! conditional references. Broken references already present in the input
//! (for example in a stored assessment) are left alone and reported by
//! [`schema::lint`].

use std::collections::BTreeSet;
use std::fmt;

use talentflow_core::models::assessment::{
    Assessment, ConditionalLogic, Question, QuestionKind, Section,
};

use crate::error::SchemaError;
use crate::schema;

/// Locates a section by position or id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRef {
    Index(usize),
    Id(String),
}

impl SectionRef {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    fn resolve(&self, assessment: &Assessment) -> Result<usize, SchemaError> {
        let found = match self {
            Self::Index(i) => (*i < assessment.sections.len()).then_some(*i),
            Self::Id(id) => assessment.sections.iter().position(|s| &s.id == id),
        };
        found.ok_or_else(|| SchemaError::SectionNotFound(self.clone()))
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Id(id) => write!(f, "'{id}'"),
        }
    }
}

/// Locates a question by id (unique across the assessment) or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionRef {
    Id(String),
    Position { section: usize, question: usize },
}

impl QuestionRef {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    fn resolve(&self, assessment: &Assessment) -> Result<(usize, usize), SchemaError> {
        let found = match self {
            Self::Id(id) => assessment.question_position(id),
            Self::Position { section, question } => assessment
                .sections
                .get(*section)
                .filter(|s| *question < s.questions.len())
                .map(|_| (*section, *question)),
        };
        found.ok_or_else(|| SchemaError::QuestionNotFound(self.clone()))
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "'{id}'"),
            Self::Position { section, question } => write!(f, "#{section}.{question}"),
        }
    }
}

/// Partial update of a section. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct SectionPatch {
    pub title: Option<String>,
}

/// Partial update of a question. `None` leaves the field as is; the nested
/// options allow clearing `description` and `conditional_logic`.
///
/// Changing the type replaces the whole [`QuestionKind`], so the caller
/// supplies the new variant's constraints along with it.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub required: Option<bool>,
    pub kind: Option<QuestionKind>,
    pub conditional_logic: Option<Option<ConditionalLogic>>,
}

impl QuestionPatch {
    fn apply(self, question: &mut Question) {
        if let Some(title) = self.title {
            question.title = title;
        }
        if let Some(description) = self.description {
            question.description = description;
        }
        if let Some(required) = self.required {
            question.required = required;
        }
        if let Some(kind) = self.kind {
            question.kind = kind;
        }
        if let Some(logic) = self.conditional_logic {
            question.conditional_logic = logic;
        }
    }
}

pub fn add_section(assessment: &Assessment, section: Section) -> Result<Assessment, SchemaError> {
    let mut next = assessment.clone();
    tracing::debug!(section_id = %section.id, "adding section");
    next.sections.push(section);
    checked(assessment, next)
}

pub fn update_section(
    assessment: &Assessment,
    at: SectionRef,
    patch: SectionPatch,
) -> Result<Assessment, SchemaError> {
    let index = at.resolve(assessment)?;
    let mut next = assessment.clone();
    if let Some(title) = patch.title {
        next.sections[index].title = title;
    }
    checked(assessment, next)
}

/// Remove a section and its questions. Fails if a question outside the
/// section still depends on one inside it.
pub fn remove_section(assessment: &Assessment, at: SectionRef) -> Result<Assessment, SchemaError> {
    let index = at.resolve(assessment)?;
    let mut next = assessment.clone();
    let removed = next.sections.remove(index);

    for question in &removed.questions {
        let dependents = schema::dependents_of(&next, &question.id);
        if !dependents.is_empty() {
            return Err(SchemaError::QuestionReferenced {
                question_id: question.id.clone(),
                dependents,
            });
        }
    }

    tracing::debug!(
        section_id = %removed.id,
        questions = removed.questions.len(),
        "removed section"
    );
    checked(assessment, next)
}

pub fn add_question(
    assessment: &Assessment,
    to: SectionRef,
    question: Question,
) -> Result<Assessment, SchemaError> {
    let index = to.resolve(assessment)?;
    let mut next = assessment.clone();
    tracing::debug!(
        question_id = %question.id,
        kind = question.kind.type_name(),
        "adding question"
    );
    next.sections[index].questions.push(question);
    checked(assessment, next)
}

pub fn update_question(
    assessment: &Assessment,
    at: QuestionRef,
    patch: QuestionPatch,
) -> Result<Assessment, SchemaError> {
    let (si, qi) = at.resolve(assessment)?;
    let mut next = assessment.clone();
    patch.apply(&mut next.sections[si].questions[qi]);
    checked(assessment, next)
}

/// Remove a question. Fails while other questions depend on it; detach or
/// remove the dependents first.
pub fn remove_question(
    assessment: &Assessment,
    at: QuestionRef,
) -> Result<Assessment, SchemaError> {
    let (si, qi) = at.resolve(assessment)?;
    let mut next = assessment.clone();
    let removed = next.sections[si].questions.remove(qi);

    let dependents = schema::dependents_of(&next, &removed.id);
    if !dependents.is_empty() {
        return Err(SchemaError::QuestionReferenced {
            question_id: removed.id,
            dependents,
        });
    }

    tracing::debug!(question_id = %removed.id, "removed question");
    checked(assessment, next)
}

/// Move a question to `index` within the target section (which may be the
/// section it is already in). `index` is interpreted after removal.
pub fn move_question(
    assessment: &Assessment,
    at: QuestionRef,
    to: SectionRef,
    index: usize,
) -> Result<Assessment, SchemaError> {
    let (si, qi) = at.resolve(assessment)?;
    let target = to.resolve(assessment)?;
    let mut next = assessment.clone();
    let question = next.sections[si].questions.remove(qi);

    let len = next.sections[target].questions.len();
    if index > len {
        return Err(SchemaError::PositionOutOfRange { index, len });
    }
    next.sections[target].questions.insert(index, question);
    checked(assessment, next)
}

/// Give a question a new id, rewriting every conditional reference to the
/// old id so dependents keep pointing at it.
pub fn rename_question(
    assessment: &Assessment,
    at: QuestionRef,
    new_id: impl Into<String>,
) -> Result<Assessment, SchemaError> {
    let new_id = new_id.into();
    let (si, qi) = at.resolve(assessment)?;
    let old_id = assessment.sections[si].questions[qi].id.clone();
    if old_id == new_id {
        return Ok(assessment.clone());
    }
    if assessment.find_question(&new_id).is_some() {
        return Err(SchemaError::DuplicateQuestionId(new_id));
    }

    let mut next = assessment.clone();
    next.sections[si].questions[qi].id = new_id.clone();
    let mut rewired = 0usize;
    for question in next.sections.iter_mut().flat_map(|s| s.questions.iter_mut()) {
        if let Some(logic) = question.conditional_logic.as_mut()
            && logic.question_id == old_id
        {
            logic.question_id = new_id.clone();
            rewired += 1;
        }
    }

    let rename = |id: String| if id == old_id { new_id.clone() } else { id };
    let known = schema::broken_references(assessment)
        .into_iter()
        .map(|(question_id, target)| (rename(question_id), rename(target)))
        .collect();

    tracing::debug!(%old_id, %new_id, rewired, "renamed question");
    checked_with(known, next)
}

fn checked(before: &Assessment, next: Assessment) -> Result<Assessment, SchemaError> {
    checked_with(schema::broken_references(before), next)
}

fn checked_with(
    known: BTreeSet<(String, String)>,
    next: Assessment,
) -> Result<Assessment, SchemaError> {
    schema::check_schema(&next)?;
    schema::check_references_except(&next, &known)?;
    Ok(next)
}
