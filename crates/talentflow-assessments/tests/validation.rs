use serde_json::json;

use talentflow_assessments::validation::QuestionValidator;
use talentflow_assessments::{ValidationCode, ValidationError, ValidatorSet};
use talentflow_core::models::assessment::{Assessment, Question, QuestionKind, Section};

fn validator(kind: QuestionKind, required: bool) -> QuestionValidator {
    let mut question = Question::new("q", "Question", kind);
    question.required = required;
    QuestionValidator::synthesize(&question)
}

fn codes(result: Result<serde_json::Value, Vec<ValidationError>>) -> Vec<ValidationCode> {
    result.unwrap_err().into_iter().map(|e| e.code).collect()
}

#[test]
fn numeric_range() {
    let v = validator(QuestionKind::numeric(Some(0.0), Some(10.0)).unwrap(), false);

    assert_eq!(v.validate(Some(&json!(5))).unwrap(), json!(5));
    assert_eq!(codes(v.validate(Some(&json!(-1)))), [ValidationCode::BelowMinimum]);
    assert_eq!(codes(v.validate(Some(&json!(11)))), [ValidationCode::AboveMaximum]);
    assert!(v.validate(Some(&json!(0))).is_ok());
    assert!(v.validate(Some(&json!(10))).is_ok());
}

#[test]
fn numeric_messages_show_bounds() {
    let v = validator(QuestionKind::numeric(Some(1.0), Some(2.5)).unwrap(), true);

    let errors = v.validate(Some(&json!(0))).unwrap_err();
    assert_eq!(errors[0].message, "Minimum value is 1");
    let errors = v.validate(Some(&json!(3))).unwrap_err();
    assert_eq!(errors[0].message, "Maximum value is 2.5");
    let errors = v.validate(None).unwrap_err();
    assert_eq!(errors[0].message, "This field is required");
}

#[test]
fn numeric_rejects_text() {
    let v = validator(QuestionKind::numeric(None, None).unwrap(), false);
    let errors = v.validate(Some(&json!("5"))).unwrap_err();
    assert_eq!(errors[0].code, ValidationCode::TypeMismatch);
    assert_eq!(errors[0].message, "Expected a number");
}

#[test]
fn short_text_required_with_max_length() {
    let v = validator(QuestionKind::short_text(Some(5)), true);

    let errors = v.validate(Some(&json!(""))).unwrap_err();
    assert_eq!(errors[0].code, ValidationCode::Required);
    assert_eq!(errors[0].message, "This field is required");

    let errors = v.validate(Some(&json!("toolong"))).unwrap_err();
    assert_eq!(errors[0].code, ValidationCode::TooLong);
    assert_eq!(errors[0].message, "Maximum 5 characters");

    assert_eq!(v.validate(Some(&json!("ok"))).unwrap(), json!("ok"));
}

#[test]
fn max_length_counts_characters() {
    let v = validator(QuestionKind::long_text(Some(3)), false);
    assert!(v.validate(Some(&json!("äöü"))).is_ok());
    assert!(v.validate(Some(&json!("äöüß"))).is_err());
}

#[test]
fn multi_choice_required() {
    let v = validator(QuestionKind::multi_choice(["A", "B"]).unwrap(), true);

    let errors = v.validate(Some(&json!([]))).unwrap_err();
    assert_eq!(errors[0].message, "Please select at least one option");
    assert!(v.validate(Some(&json!(["A"]))).is_ok());
    assert_eq!(codes(v.validate(Some(&json!(["A", "C"])))), [ValidationCode::InvalidOption]);
    assert_eq!(codes(v.validate(Some(&json!("A")))), [ValidationCode::TypeMismatch]);
}

#[test]
fn single_choice_membership() {
    let v = validator(QuestionKind::single_choice(["Yes", "No"]).unwrap(), false);

    assert!(v.validate(Some(&json!("Yes"))).is_ok());
    assert!(v.validate(Some(&json!(""))).is_ok());
    assert_eq!(codes(v.validate(Some(&json!("Maybe")))), [ValidationCode::InvalidOption]);

    let required = validator(QuestionKind::single_choice(["Yes", "No"]).unwrap(), true);
    let errors = required.validate(Some(&json!(""))).unwrap_err();
    assert_eq!(errors[0].message, "Please select an option");
}

#[test]
fn file_upload() {
    let required = validator(QuestionKind::FileUpload, true);
    let errors = required.validate(None).unwrap_err();
    assert_eq!(errors[0].message, "Please upload a file");
    assert!(required.validate(Some(&json!(""))).is_err());
    assert!(required.validate(Some(&json!("resume.pdf"))).is_ok());

    let optional = validator(QuestionKind::FileUpload, false);
    assert!(optional.validate(None).is_ok());
    assert!(optional.validate(Some(&json!({"name": "resume.pdf"}))).is_ok());
}

#[test]
fn unsupported_type_is_permissive_text() {
    let v = validator(QuestionKind::Unsupported, true);
    assert!(v.validate(None).is_ok());
    assert!(v.validate(Some(&json!("anything"))).is_ok());
    assert_eq!(codes(v.validate(Some(&json!(42)))), [ValidationCode::TypeMismatch]);
}

#[test]
fn null_means_unanswered() {
    let optional = validator(QuestionKind::short_text(None), false);
    assert_eq!(optional.validate(Some(&json!(null))).unwrap(), json!(null));

    let required = validator(QuestionKind::short_text(None), true);
    assert_eq!(codes(required.validate(Some(&json!(null)))), [ValidationCode::Required]);
}

#[test]
fn synthesis_is_deterministic() {
    let years = QuestionKind::numeric(Some(0.0), None).unwrap();
    let question = Question::new("q", "Years", years).required();
    assert_eq!(
        QuestionValidator::synthesize(&question),
        QuestionValidator::synthesize(&question)
    );
}

#[test]
fn validator_set_follows_canonical_order() {
    let mut assessment = Assessment::new(uuid::Uuid::nil(), "Ops", jiff::Timestamp::UNIX_EPOCH);
    assessment.sections = vec![
        Section::new("s1", "One")
            .with_question(Question::new("b", "B", QuestionKind::FileUpload))
            .with_question(Question::new("a", "A", QuestionKind::short_text(None))),
        Section::new("s2", "Two")
            .with_question(Question::new("c", "C", QuestionKind::long_text(None))),
    ];

    let set = ValidatorSet::synthesize(&assessment);
    let ids: Vec<&str> = set.iter().map(|v| v.question_id()).collect();
    assert_eq!(ids, ["b", "a", "c"]);
    assert_eq!(set.len(), 3);
    assert!(set.get("c").is_some());
    assert!(set.get("zz").is_none());
}
