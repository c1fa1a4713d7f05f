use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A job-scoped questionnaire: ordered sections of ordered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Assessment {
    /// Create an empty assessment for a job, stamped with `now`.
    pub fn new(job_id: Uuid, title: impl Into<String>, now: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            title: title.into(),
            description: None,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// All questions in canonical render order (section by section).
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    /// `(section index, question index)` of the question with this id.
    pub fn question_position(&self, id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section
                .questions
                .iter()
                .position(|q| q.id == id)
                .map(|qi| (si, qi))
        })
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

/// A single question. The answer shape and its constraints live in
/// [`QuestionKind`], serialized inline under the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,
}

impl Question {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            required: false,
            kind,
            conditional_logic: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn shown_when(mut self, logic: ConditionalLogic) -> Self {
        self.conditional_logic = Some(logic);
        self
    }
}

/// Answer shape of a question, keyed by `type`. Each variant carries only
/// the constraints that apply to it.
///
/// Unknown `type` strings deserialize to [`QuestionKind::Unsupported`] and
/// are validated permissively as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    MultiChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    ShortText {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    LongText {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Numeric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    FileUpload,
    #[serde(other)]
    #[ts(skip)]
    Unsupported,
}

impl QuestionKind {
    pub fn single_choice<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, CoreError> {
        let kind = Self::SingleChoice {
            options: options.into_iter().map(Into::into).collect(),
        };
        kind.check()?;
        Ok(kind)
    }

    pub fn multi_choice<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, CoreError> {
        let kind = Self::MultiChoice {
            options: options.into_iter().map(Into::into).collect(),
        };
        kind.check()?;
        Ok(kind)
    }

    pub fn short_text(max_length: Option<usize>) -> Self {
        Self::ShortText { max_length }
    }

    pub fn long_text(max_length: Option<usize>) -> Self {
        Self::LongText { max_length }
    }

    pub fn numeric(min: Option<f64>, max: Option<f64>) -> Result<Self, CoreError> {
        let kind = Self::Numeric { min, max };
        kind.check()?;
        Ok(kind)
    }

    /// The wire name of this variant (`"short-text"`, `"numeric"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SingleChoice { .. } => "single-choice",
            Self::MultiChoice { .. } => "multi-choice",
            Self::ShortText { .. } => "short-text",
            Self::LongText { .. } => "long-text",
            Self::Numeric { .. } => "numeric",
            Self::FileUpload => "file-upload",
            Self::Unsupported => "unsupported",
        }
    }

    /// Enforce the per-variant invariants: choice questions need at least one
    /// option, numeric bounds must be finite and ordered.
    pub fn check(&self) -> Result<(), CoreError> {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => {
                if options.is_empty() {
                    return Err(CoreError::InvalidQuestion(format!(
                        "{} question needs at least one option",
                        self.type_name()
                    )));
                }
                if options.iter().any(|o| o.trim().is_empty()) {
                    return Err(CoreError::InvalidQuestion(
                        "options must not be blank".to_string(),
                    ));
                }
            }
            Self::Numeric { min, max } => {
                if min.is_some_and(|v| !v.is_finite()) || max.is_some_and(|v| !v.is_finite()) {
                    return Err(CoreError::InvalidQuestion(
                        "numeric bounds must be finite".to_string(),
                    ));
                }
                if let (Some(min), Some(max)) = (min, max)
                    && min > max
                {
                    return Err(CoreError::InvalidQuestion(format!(
                        "numeric min {min} is greater than max {max}"
                    )));
                }
            }
            Self::ShortText { .. }
            | Self::LongText { .. }
            | Self::FileUpload
            | Self::Unsupported => {}
        }
        Ok(())
    }
}

/// Makes a question's visibility depend on another question's answer.
///
/// `question_id` is a plain foreign key into the same assessment, resolved by
/// lookup at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConditionalLogic {
    pub question_id: String,
    #[ts(type = "\"equals\" | \"not-equals\" | \"contains\" | \"greater-than\" | \"less-than\"")]
    pub operator: Operator,
    pub value: LogicValue,
}

impl ConditionalLogic {
    pub fn new(
        question_id: impl Into<String>,
        operator: Operator,
        value: impl Into<LogicValue>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Comparison applied by [`ConditionalLogic`]. Operator strings this build
/// does not know are kept verbatim in [`Operator::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Other(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not-equals",
            Self::Contains => "contains",
            Self::GreaterThan => "greater-than",
            Self::LessThan => "less-than",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "equals" => Self::Equals,
            "not-equals" => Self::NotEquals,
            "contains" => Self::Contains,
            "greater-than" => Self::GreaterThan,
            "less-than" => Self::LessThan,
            _ => Self::Other(raw),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a conditional comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum LogicValue {
    Number(f64),
    Text(String),
}

impl From<&str> for LogicValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LogicValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for LogicValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for LogicValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}
