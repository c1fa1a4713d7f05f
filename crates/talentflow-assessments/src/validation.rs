//! Validation synthesis.
//!
//! A [`QuestionValidator`] is derived once from a question's type and
//! constraints and then applied to answers as often as needed. Synthesis is
//! pure: the same question always yields the same validator, and validators
//! hold no per-candidate state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use talentflow_core::models::assessment::{Assessment, Question, QuestionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationCode {
    Required,
    TypeMismatch,
    TooLong,
    BelowMinimum,
    AboveMaximum,
    InvalidOption,
}

/// One failed rule for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
#[error("{question_id}: {message}")]
pub struct ValidationError {
    pub question_id: String,
    pub code: ValidationCode,
    pub message: String,
}

/// Expected JSON shape of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Text,
    Number,
    TextList,
    /// Anything goes; used by file uploads.
    Any,
}

impl Shape {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Shape::Text => value.is_string(),
            Shape::Number => value.is_number(),
            Shape::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Shape::Any => true,
        }
    }

    fn mismatch_message(self) -> &'static str {
        match self {
            Shape::Text => "Expected text",
            Shape::Number => "Expected a number",
            Shape::TextList => "Expected a list of options",
            Shape::Any => "Unexpected value",
        }
    }
}

/// A constraint applied after the shape check passed.
#[derive(Debug, Clone, PartialEq)]
enum Rule {
    MaxChars(usize),
    Min(f64),
    Max(f64),
    OneOf(Vec<String>),
    AllOf(Vec<String>),
}

impl Rule {
    fn apply(&self, value: &Value) -> Option<(ValidationCode, String)> {
        match self {
            Rule::MaxChars(n) => value
                .as_str()
                .filter(|s| s.chars().count() > *n)
                .map(|_| (ValidationCode::TooLong, format!("Maximum {n} characters"))),
            Rule::Min(min) => value
                .as_f64()
                .filter(|v| v < min)
                .map(|_| (ValidationCode::BelowMinimum, format!("Minimum value is {min}"))),
            Rule::Max(max) => value
                .as_f64()
                .filter(|v| v > max)
                .map(|_| (ValidationCode::AboveMaximum, format!("Maximum value is {max}"))),
            Rule::OneOf(options) => value
                .as_str()
                .filter(|s| !s.is_empty() && !options.iter().any(|o| o == s))
                .map(|s| {
                    (
                        ValidationCode::InvalidOption,
                        format!("\"{s}\" is not one of the available options"),
                    )
                }),
            Rule::AllOf(options) => {
                let unknown: Vec<&str> = value
                    .as_array()
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .filter(|s| !options.iter().any(|o| o == s))
                    .collect();
                (!unknown.is_empty()).then(|| {
                    (
                        ValidationCode::InvalidOption,
                        format!("Not available options: {}", unknown.join(", ")),
                    )
                })
            }
        }
    }
}

/// How an unanswered or empty answer is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Optional,
    /// Must be present; any value of the right shape counts.
    Present(&'static str),
    /// Must be present and, for text and lists, non-empty.
    NonEmpty(&'static str),
}

/// Validator synthesized for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionValidator {
    question_id: String,
    shape: Shape,
    presence: Presence,
    rules: Vec<Rule>,
}

impl QuestionValidator {
    pub fn synthesize(question: &Question) -> Self {
        let required = question.required;
        let (shape, presence, rules) = match &question.kind {
            QuestionKind::ShortText { max_length } | QuestionKind::LongText { max_length } => (
                Shape::Text,
                non_empty_if(required, "This field is required"),
                max_length.iter().map(|n| Rule::MaxChars(*n)).collect(),
            ),
            QuestionKind::Numeric { min, max } => {
                let mut rules = Vec::new();
                if let Some(min) = min {
                    rules.push(Rule::Min(*min));
                }
                if let Some(max) = max {
                    rules.push(Rule::Max(*max));
                }
                let presence = if required {
                    Presence::Present("This field is required")
                } else {
                    Presence::Optional
                };
                (Shape::Number, presence, rules)
            }
            QuestionKind::SingleChoice { options } => (
                Shape::Text,
                non_empty_if(required, "Please select an option"),
                vec![Rule::OneOf(options.clone())],
            ),
            QuestionKind::MultiChoice { options } => (
                Shape::TextList,
                non_empty_if(required, "Please select at least one option"),
                vec![Rule::AllOf(options.clone())],
            ),
            QuestionKind::FileUpload => (
                Shape::Any,
                non_empty_if(required, "Please upload a file"),
                Vec::new(),
            ),
            // Intentional fallback: unknown types accept any text, or nothing.
            QuestionKind::Unsupported => (Shape::Text, Presence::Optional, Vec::new()),
        };

        Self {
            question_id: question.id.clone(),
            shape,
            presence,
            rules,
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// Check one answer. `None` and JSON `null` both mean "not answered".
    /// On success the accepted value is returned (`null` when unanswered).
    pub fn validate(&self, value: Option<&Value>) -> Result<Value, Vec<ValidationError>> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return match self.presence {
                Presence::Optional => Ok(Value::Null),
                Presence::Present(message) | Presence::NonEmpty(message) => {
                    Err(vec![self.error(ValidationCode::Required, message)])
                }
            };
        };

        if !self.shape.accepts(value) {
            return Err(vec![self.error(
                ValidationCode::TypeMismatch,
                self.shape.mismatch_message(),
            )]);
        }

        if let Presence::NonEmpty(message) = self.presence
            && !has_content(value)
        {
            return Err(vec![self.error(ValidationCode::Required, message)]);
        }

        let errors: Vec<_> = self
            .rules
            .iter()
            .filter_map(|rule| rule.apply(value))
            .map(|(code, message)| ValidationError {
                question_id: self.question_id.clone(),
                code,
                message,
            })
            .collect();

        if errors.is_empty() {
            Ok(value.clone())
        } else {
            Err(errors)
        }
    }

    fn error(&self, code: ValidationCode, message: &str) -> ValidationError {
        ValidationError {
            question_id: self.question_id.clone(),
            code,
            message: message.to_string(),
        }
    }
}

fn non_empty_if(required: bool, message: &'static str) -> Presence {
    if required {
        Presence::NonEmpty(message)
    } else {
        Presence::Optional
    }
}

/// A non-empty string or list. Uploads are represented as a file name or a
/// list of file names, so anything without a length does not count.
fn has_content(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Validators for every question of an assessment, in canonical order.
#[derive(Debug, Clone, Default)]
pub struct ValidatorSet {
    validators: Vec<QuestionValidator>,
}

impl ValidatorSet {
    pub fn synthesize(assessment: &Assessment) -> Self {
        Self {
            validators: assessment
                .questions()
                .map(QuestionValidator::synthesize)
                .collect(),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionValidator> {
        self.validators.iter().find(|v| v.question_id == question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionValidator> {
        self.validators.iter()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
