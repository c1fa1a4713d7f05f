//! Conditional visibility.
//!
//! Visibility is a pure function of a question and the current answers.
//! Comparisons follow the loose rules the dashboard frontend applies to form
//! values, so the same answers show the same questions on both sides:
//!
//! - a missing or falsy dependency answer (`null`, `false`, `0`, `""`)
//!   hides the question whatever the operator;
//! - `equals` / `not-equals` compare numbers by value and strings exactly,
//!   lists and objects never compare equal;
//! - `contains` compares string forms (lists join with `,`);
//! - `greater-than` / `less-than` compare numeric forms, where text that is
//!   not a number never satisfies either.
//!
//! An operator this build does not know leaves the question visible.

use std::collections::BTreeMap;

use serde_json::Value;

use talentflow_core::models::assessment::{Assessment, LogicValue, Operator, Question};
use talentflow_core::models::response::Answers;

/// Visibility of every question, keyed by question id.
pub type VisibilityMap = BTreeMap<String, bool>;

pub fn is_visible(question: &Question, answers: &Answers) -> bool {
    let Some(logic) = &question.conditional_logic else {
        return true;
    };

    let Some(current) = answers.get(&logic.question_id).filter(|v| !is_falsy(v)) else {
        return false;
    };

    match &logic.operator {
        Operator::Equals => strict_equals(current, &logic.value),
        Operator::NotEquals => !strict_equals(current, &logic.value),
        Operator::Contains => to_text(current).contains(&logic_text(&logic.value)),
        Operator::GreaterThan => to_number(current) > logic_number(&logic.value),
        Operator::LessThan => to_number(current) < logic_number(&logic.value),
        Operator::Other(raw) => {
            tracing::trace!(
                operator = %raw,
                question_id = %question.id,
                "unknown operator, showing question"
            );
            true
        }
    }
}

pub fn visibility_map(assessment: &Assessment, answers: &Answers) -> VisibilityMap {
    assessment
        .questions()
        .map(|q| (q.id.clone(), is_visible(q, answers)))
        .collect()
}

/// Currently visible questions, in canonical order.
pub fn visible_questions<'a>(assessment: &'a Assessment, answers: &Answers) -> Vec<&'a Question> {
    assessment
        .questions()
        .filter(|q| is_visible(q, answers))
        .collect()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn strict_equals(current: &Value, expected: &LogicValue) -> bool {
    match (current, expected) {
        (Value::Number(n), LogicValue::Number(e)) => n.as_f64() == Some(*e),
        (Value::String(s), LogicValue::Text(e)) => s == e,
        _ => false,
    }
}

fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else {
        n.to_string()
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn text_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also parses "inf" and "nan", which are not numbers here.
        s if s
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            f64::NAN
        }
        s => s.parse().unwrap_or(f64::NAN),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => text_to_number(s),
        Value::Array(_) => text_to_number(&to_text(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn logic_text(value: &LogicValue) -> String {
    match value {
        LogicValue::Text(s) => s.clone(),
        LogicValue::Number(n) => format_number(*n),
    }
}

fn logic_number(value: &LogicValue) -> f64 {
    match value {
        LogicValue::Text(s) => text_to_number(s),
        LogicValue::Number(n) => *n,
    }
}

