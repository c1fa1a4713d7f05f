use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use talentflow_core::models::assessment::Assessment;

use crate::error::SchemaError;

/// Hard structural checks: unique section ids, question ids unique across
/// the whole assessment, and every question variant's own invariants.
pub fn check_schema(assessment: &Assessment) -> Result<(), SchemaError> {
    let mut section_ids = HashSet::new();
    let mut question_ids = HashSet::new();

    for section in &assessment.sections {
        if !section_ids.insert(section.id.as_str()) {
            return Err(SchemaError::DuplicateSectionId(section.id.clone()));
        }
        for question in &section.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(SchemaError::DuplicateQuestionId(question.id.clone()));
            }
            question
                .kind
                .check()
                .map_err(|source| SchemaError::InvalidQuestion {
                    question_id: question.id.clone(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Every conditional reference must resolve to another question of the
/// same assessment. Cycles are not checked here; see [`lint`].
pub fn check_references(assessment: &Assessment) -> Result<(), SchemaError> {
    check_references_except(assessment, &BTreeSet::new())
}

/// `(question id, target)` of every conditional reference that points at
/// the question itself or at no question.
pub fn broken_references(assessment: &Assessment) -> BTreeSet<(String, String)> {
    assessment
        .questions()
        .filter_map(|q| q.conditional_logic.as_ref().map(|l| (q, l)))
        .filter(|(q, l)| {
            l.question_id == q.id || assessment.find_question(&l.question_id).is_none()
        })
        .map(|(q, l)| (q.id.clone(), l.question_id.clone()))
        .collect()
}

/// Like [`check_references`], but lets through the broken references listed
/// in `known`.
pub fn check_references_except(
    assessment: &Assessment,
    known: &BTreeSet<(String, String)>,
) -> Result<(), SchemaError> {
    for question in assessment.questions() {
        let Some(logic) = &question.conditional_logic else {
            continue;
        };
        let pair = (question.id.clone(), logic.question_id.clone());
        if known.contains(&pair) {
            continue;
        }
        if logic.question_id == question.id {
            return Err(SchemaError::SelfReference(question.id.clone()));
        }
        if assessment.find_question(&logic.question_id).is_none() {
            return Err(SchemaError::DanglingReference {
                question_id: question.id.clone(),
                target: logic.question_id.clone(),
            });
        }
    }
    Ok(())
}

/// Ids of the questions whose conditional logic points at `question_id`.
pub fn dependents_of(assessment: &Assessment, question_id: &str) -> Vec<String> {
    assessment
        .questions()
        .filter(|q| {
            q.conditional_logic
                .as_ref()
                .is_some_and(|l| l.question_id == question_id)
        })
        .map(|q| q.id.clone())
        .collect()
}

/// Questions whose visibility depends, directly or transitively, on each
/// other. Evaluation order inside such a loop is undefined, so builders
/// should refuse to save one; the engine only reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCycleWarning {
    /// Question ids along the loop, starting from the first one reached in
    /// canonical order.
    pub cycle: Vec<String>,
}

/// Non-fatal findings about an assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    DependencyCycle(DependencyCycleWarning),
    DanglingReference { question_id: String, target: String },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyCycle(w) => {
                write!(f, "conditional logic cycle: {}", w.cycle.join(" -> "))
            }
            Self::DanglingReference {
                question_id,
                target,
            } => write!(
                f,
                "question '{question_id}' depends on unknown question '{target}' \
                 and will stay hidden"
            ),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// Report dependency cycles and dangling references without rejecting
/// anything.
///
/// Each question has at most one dependency, so the dependency graph is a
/// set of chains; walking each chain once finds every loop.
pub fn lint(assessment: &Assessment) -> Vec<SchemaWarning> {
    let edges: HashMap<&str, &str> = assessment
        .questions()
        .filter_map(|q| {
            q.conditional_logic
                .as_ref()
                .map(|l| (q.id.as_str(), l.question_id.as_str()))
        })
        .collect();

    let mut warnings = Vec::new();
    for question in assessment.questions() {
        if let Some(logic) = &question.conditional_logic
            && assessment.find_question(&logic.question_id).is_none()
        {
            warnings.push(SchemaWarning::DanglingReference {
                question_id: question.id.clone(),
                target: logic.question_id.clone(),
            });
        }
    }

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    for question in assessment.questions() {
        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(question.id.as_str());

        while let Some(id) = current {
            match marks.get(id) {
                Some(Mark::Done) => break,
                Some(Mark::OnPath) => {
                    if let Some(start) = path.iter().position(|p| *p == id) {
                        warnings.push(SchemaWarning::DependencyCycle(DependencyCycleWarning {
                            cycle: path[start..].iter().map(|s| s.to_string()).collect(),
                        }));
                    }
                    break;
                }
                None => {
                    marks.insert(id, Mark::OnPath);
                    path.push(id);
                    current = edges.get(id).copied();
                }
            }
        }

        for id in path {
            marks.insert(id, Mark::Done);
        }
    }

    warnings
}
