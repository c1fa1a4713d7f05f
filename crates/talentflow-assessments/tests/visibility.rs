use serde_json::json;

use talentflow_assessments::AssessmentRuntime;
use talentflow_assessments::visibility::{is_visible, visibility_map, visible_questions};
use talentflow_core::models::assessment::{
    Assessment, ConditionalLogic, LogicValue, Operator, Question, QuestionKind, Section,
};
use talentflow_core::models::response::Answers;

fn answers(pairs: &[(&str, serde_json::Value)]) -> Answers {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn dependent(operator: Operator, value: impl Into<LogicValue>) -> Question {
    Question::new("q2", "Follow-up", QuestionKind::short_text(None))
        .required()
        .shown_when(ConditionalLogic::new("q1", operator, value))
}

fn two_question_assessment(q2: Question) -> Assessment {
    let now = jiff::Timestamp::UNIX_EPOCH;
    let mut a = Assessment::new(uuid::Uuid::nil(), "Screening", now);
    a.sections.push(
        Section::new("s1", "General")
            .with_question(Question::new("q1", "Answer", QuestionKind::short_text(None)))
            .with_question(q2),
    );
    a
}

#[test]
fn unconditional_question_is_visible() {
    let q = Question::new("q1", "Name", QuestionKind::short_text(None));
    assert!(is_visible(&q, &Answers::new()));
}

#[test]
fn equals_controls_visibility() {
    let q2 = dependent(Operator::Equals, "yes");

    assert!(is_visible(&q2, &answers(&[("q1", json!("yes"))])));
    assert!(!is_visible(&q2, &answers(&[("q1", json!("no"))])));
    assert!(!is_visible(&q2, &Answers::new()));
}

#[test]
fn hidden_required_question_is_not_validated() {
    let a = two_question_assessment(dependent(Operator::Equals, "yes"));
    let runtime = AssessmentRuntime::load(a).unwrap();

    assert!(runtime.validate(&answers(&[("q1", json!("no"))])).is_ok());
    assert!(runtime.validate(&Answers::new()).is_ok());

    let errors = runtime.validate(&answers(&[("q1", json!("yes"))])).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].question_id, "q2");
}

#[test]
fn falsy_dependency_hides_for_every_operator() {
    for op in [Operator::NotEquals, Operator::LessThan, Operator::Contains] {
        let q2 = dependent(op, "x");
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_visible(&q2, &answers(&[("q1", falsy.clone())])), "{falsy}");
        }
    }
}

#[test]
fn zero_text_and_empty_containers_are_truthy() {
    let q2 = dependent(Operator::NotEquals, "x");
    for truthy in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
        assert!(is_visible(&q2, &answers(&[("q1", truthy.clone())])), "{truthy}");
    }
}

#[test]
fn equals_is_strict_about_types() {
    let number = dependent(Operator::Equals, 3.0);
    assert!(is_visible(&number, &answers(&[("q1", json!(3))])));
    assert!(!is_visible(&number, &answers(&[("q1", json!("3"))])));

    let text = dependent(Operator::Equals, "a");
    assert!(!is_visible(&text, &answers(&[("q1", json!(["a"]))])));
}

#[test]
fn not_equals_inverts_equals() {
    let q2 = dependent(Operator::NotEquals, "yes");
    assert!(is_visible(&q2, &answers(&[("q1", json!("no"))])));
    assert!(!is_visible(&q2, &answers(&[("q1", json!("yes"))])));
    assert!(is_visible(&q2, &answers(&[("q1", json!(["yes"]))])));
}

#[test]
fn contains_uses_string_forms() {
    let q2 = dependent(Operator::Contains, "Rust");
    assert!(is_visible(&q2, &answers(&[("q1", json!("I like Rust"))])));
    assert!(is_visible(&q2, &answers(&[("q1", json!(["Go", "Rust"]))])));
    assert!(!is_visible(&q2, &answers(&[("q1", json!("rust"))])));

    let digits = dependent(Operator::Contains, 2.0);
    assert!(is_visible(&digits, &answers(&[("q1", json!(123))])));
}

#[test]
fn contains_string_forms_of_lists_objects_and_numbers() {
    let gap = dependent(Operator::Contains, ",,");
    assert!(is_visible(&gap, &answers(&[("q1", json!(["a", null, 2]))])));
    assert!(!is_visible(&gap, &answers(&[("q1", json!(["a", 2]))])));

    let object = dependent(Operator::Contains, "object Object");
    assert!(is_visible(&object, &answers(&[("q1", json!({"k": 1}))])));

    let fraction = dependent(Operator::Contains, "3.5");
    assert!(is_visible(&fraction, &answers(&[("q1", json!(3.5))])));

    // a whole-number logic value reads as "4", not "4.0"
    let whole = dependent(Operator::Contains, 4.0);
    assert!(is_visible(&whole, &answers(&[("q1", json!(14))])));
    assert!(!is_visible(&whole, &answers(&[("q1", json!(13))])));
}

#[test]
fn ordering_operators_coerce_to_numbers() {
    let gt = dependent(Operator::GreaterThan, 2.0);
    assert!(is_visible(&gt, &answers(&[("q1", json!(3))])));
    assert!(is_visible(&gt, &answers(&[("q1", json!(" 10 "))])));
    assert!(!is_visible(&gt, &answers(&[("q1", json!(2))])));
    assert!(!is_visible(&gt, &answers(&[("q1", json!("abc"))])));

    let lt = dependent(Operator::LessThan, "5");
    assert!(is_visible(&lt, &answers(&[("q1", json!(4))])));
    assert!(is_visible(&lt, &answers(&[("q1", json!(true))])));
    assert!(!is_visible(&lt, &answers(&[("q1", json!("abc"))])));
}

#[test]
fn numeric_forms_of_text_and_lists() {
    let above_five = dependent(Operator::GreaterThan, 5.0);
    assert!(is_visible(&above_five, &answers(&[("q1", json!(["7"]))])));

    let pair = answers(&[("q1", json!(["1", "2"]))]);
    assert!(!is_visible(&above_five, &pair));
    assert!(!is_visible(&dependent(Operator::LessThan, 5.0), &pair));

    for op in [Operator::GreaterThan, Operator::LessThan] {
        let q2 = dependent(op, 0.0);
        assert!(!is_visible(&q2, &answers(&[("q1", json!("inf"))])));
        assert!(!is_visible(&q2, &answers(&[("q1", json!("nan"))])));
    }

    let exponent = dependent(Operator::GreaterThan, 999.0);
    assert!(is_visible(&exponent, &answers(&[("q1", json!("1e3"))])));

    let padded = answers(&[("q1", json!(" 42 "))]);
    assert!(!is_visible(&dependent(Operator::Equals, 42.0), &padded));
    assert!(is_visible(&dependent(Operator::GreaterThan, 41.0), &padded));
    assert!(!is_visible(&dependent(Operator::GreaterThan, 42.0), &padded));
}

#[test]
fn unknown_operator_shows_question() {
    let q2 = dependent(Operator::Other("matches".into()), "x");
    assert!(is_visible(&q2, &answers(&[("q1", json!("anything"))])));
}

#[test]
fn dangling_reference_hides_question() {
    let q = Question::new("q2", "Orphan", QuestionKind::short_text(None))
        .shown_when(ConditionalLogic::new("gone", Operator::NotEquals, "x"));
    assert!(!is_visible(&q, &answers(&[("q1", json!("y"))])));
}

#[test]
fn map_and_list_agree() {
    let a = two_question_assessment(dependent(Operator::Equals, "yes"));
    let current = answers(&[("q1", json!("no"))]);

    let map = visibility_map(&a, &current);
    assert_eq!(map.get("q1"), Some(&true));
    assert_eq!(map.get("q2"), Some(&false));

    let ids: Vec<&str> = visible_questions(&a, &current)
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(ids, ["q1"]);
}
